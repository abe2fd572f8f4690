//! SketchPlot Render Library
//!
//! Raster surface abstraction and history replay for SketchPlot.
//! Backends implement [`Surface`]; [`Painter`] drives them from canvas frames.

mod painter;
mod recording;
mod surface;

pub use painter::{BACKGROUND, Painter};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{Surface, SurfaceError, SurfaceResult};
