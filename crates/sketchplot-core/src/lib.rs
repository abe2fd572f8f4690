//! SketchPlot Core Library
//!
//! Platform-agnostic shape model, drawing history and interaction logic for the
//! SketchPlot canvas, plus the Octave code exporter.

pub mod canvas;
pub mod color;
pub mod export;
pub mod history;
pub mod input;
pub mod options;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use canvas::{Canvas, Frame, Response};
pub use color::{ColorParseError, PALETTE, PaletteEntry, Rgb};
pub use export::export_octave;
pub use history::History;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use options::{OptionsError, ToolOptions};
pub use shapes::{Outline, Shape, ShapeDescriptor, ShapeId, ShapeKind, ShapeStyle};
pub use snap::{GridSettings, SnapResult, snap_pointer, snap_to_grid};
pub use tools::{ToolManager, ToolOutcome, ToolState};
