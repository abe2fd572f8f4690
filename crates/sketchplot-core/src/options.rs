//! Live tool configuration read on every input event.

use crate::color::Rgb;
use crate::shapes::{ShapeKind, ShapeStyle};
use crate::snap::GridSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest vertex count a polygon can be drawn with.
pub const MIN_POLYGON_SIDES: u32 = 3;

/// Largest vertex count; past this a polygon is indistinguishable from a circle.
pub const MAX_POLYGON_SIDES: u32 = 360;

/// Options errors.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Toolbar state. Nothing here is latched at gesture start: toggling an option
/// mid-drag changes the live preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolOptions {
    pub tool: ShapeKind,
    pub fill: bool,
    /// Equal radii for circles and polygons.
    pub perfect_circle: bool,
    pub grid: GridSettings,
    /// Treat the gesture start as the shape's center instead of a corner.
    pub middle_draw: bool,
    pub stroke_width: f64,
    pub color: Rgb,
    pub polygon_sides: u32,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            tool: ShapeKind::default(),
            fill: false,
            perfect_circle: false,
            grid: GridSettings::default(),
            middle_draw: false,
            stroke_width: 5.0,
            color: Rgb::BLACK,
            polygon_sides: 5,
        }
    }
}

impl ToolOptions {
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Style applied to shapes drawn with the current options.
    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            filled: self.fill,
            color: self.color,
            stroke_width: self.stroke_width.max(0.0),
        }
    }

    /// Polygon vertex count, clamped to a drawable value.
    pub fn sides(&self) -> u32 {
        self.polygon_sides.clamp(MIN_POLYGON_SIDES, MAX_POLYGON_SIDES)
    }
}
