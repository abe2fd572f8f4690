//! Replayable event scripts for driving a session without a browser.

use crate::app::App;
use crate::rows::RowList;
use serde::{Deserialize, Serialize};
use sketchplot_core::color::{ColorParseError, Rgb};
use sketchplot_core::input::{KeyEvent, PointerEvent};
use sketchplot_core::options::{OptionsError, ToolOptions};
use sketchplot_core::shapes::{ShapeId, ShapeKind};
use sketchplot_render::{Surface, SurfaceError};
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("Step {step}: no history row at index {row}")]
    UnknownRow { step: usize, row: usize },
}

fn default_width() -> f64 {
    500.0
}

fn default_height() -> f64 {
    500.0
}

/// A recorded session: surface size, starting options and a list of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub options: ToolOptions,
    pub steps: Vec<ScriptStep>,
}

/// One scripted input. Rows are addressed by their current index among committed entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    Pointer(PointerEvent),
    Key(KeyEvent),
    Options(ToolOptions),
    Tool(ShapeKind),
    Cancel,
    SetFilled { row: usize, filled: bool },
    /// Color as `#rrggbb` or `rgb(r, g, b)`.
    SetColor { row: usize, color: String },
    SetHovered { row: usize, hovered: bool },
    Move { row: usize, offset: isize },
    Remove { row: usize },
    Export,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Feed every step to `app`. Returns the code of each `Export` step.
    pub fn run<S: Surface, R: RowList>(&self, app: &mut App<S, R>) -> Result<Vec<String>, AppError> {
        let mut exports = Vec::new();
        for (step_index, step) in self.steps.iter().enumerate() {
            log::trace!("step {step_index}: {step:?}");
            match step {
                ScriptStep::Pointer(event) => app.pointer(event)?,
                ScriptStep::Key(event) => app.key(event)?,
                ScriptStep::Options(options) => app.set_options(options.clone())?,
                ScriptStep::Tool(tool) => app.set_tool(*tool)?,
                ScriptStep::Cancel => app.cancel()?,
                ScriptStep::SetFilled { row, filled } => {
                    let id = row_id(app, step_index, *row)?;
                    app.set_filled(id, *filled)?;
                }
                ScriptStep::SetColor { row, color } => {
                    let id = row_id(app, step_index, *row)?;
                    let color: Rgb = color.parse()?;
                    app.set_color(id, color)?;
                }
                ScriptStep::SetHovered { row, hovered } => {
                    let id = row_id(app, step_index, *row)?;
                    app.set_hovered(id, *hovered)?;
                }
                ScriptStep::Move { row, offset } => {
                    let id = row_id(app, step_index, *row)?;
                    app.move_row(id, *offset)?;
                }
                ScriptStep::Remove { row } => {
                    let id = row_id(app, step_index, *row)?;
                    app.remove_row(id)?;
                }
                ScriptStep::Export => exports.push(app.export()),
            }
        }
        Ok(exports)
    }
}

fn row_id<S: Surface, R: RowList>(app: &App<S, R>, step: usize, row: usize) -> Result<ShapeId, AppError> {
    app.canvas()
        .committed()
        .nth(row)
        .map(|d| d.id())
        .ok_or(AppError::UnknownRow { step, row })
}
