//! SketchPlot Application
//!
//! Glues the drawing session, the painter and the history list together, and
//! hosts them on an HTML canvas (WASM) or behind a script runner (native).

mod app;
mod rows;
mod script;

pub use app::App;
pub use rows::{Row, RowList, VecRowList};
pub use script::{AppError, Script, ScriptStep};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, WebApp};
