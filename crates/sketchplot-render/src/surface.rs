//! Surface trait abstraction.

use kurbo::{BezPath, Size, Stroke};
use peniko::Color;
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface unavailable: {0}")]
    Unavailable(String),
    #[error("Draw failed: {0}")]
    Draw(String),
    #[error("Snapshot failed: {0}")]
    Snapshot(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A raster target the painter draws into.
///
/// Implementations can wrap an HTML canvas, an in-memory recorder, or any other
/// immediate-mode 2D context. Paths are in surface pixel coordinates.
pub trait Surface {
    /// Captured raster contents, used to undo transient previews.
    type Snapshot;

    /// Current surface size in pixels.
    fn size(&self) -> Size;

    /// Wipe the surface and paint it with the background color.
    fn clear(&mut self, background: Color) -> SurfaceResult<()>;

    fn fill_path(&mut self, path: &BezPath, color: Color) -> SurfaceResult<()>;

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> SurfaceResult<()>;

    /// Copy the current raster.
    fn snapshot(&self) -> SurfaceResult<Self::Snapshot>;

    /// Put a previously captured raster back.
    fn restore(&mut self, snapshot: &Self::Snapshot) -> SurfaceResult<()>;
}
