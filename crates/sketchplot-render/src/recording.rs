//! In-memory surface that records draw calls instead of rasterizing them.

use crate::surface::{Surface, SurfaceResult};
use kurbo::{BezPath, Size, Stroke};
use peniko::Color;
use sketchplot_core::color::Rgb;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Fill { path: BezPath, color: Rgb },
    Stroke { path: BezPath, width: f64, color: Rgb },
}

impl DrawCommand {
    /// Color the command paints with.
    pub fn color(&self) -> Rgb {
        match self {
            DrawCommand::Clear(color)
            | DrawCommand::Fill { color, .. }
            | DrawCommand::Stroke { color, .. } => *color,
        }
    }
}

/// A surface whose "raster" is the list of draw calls since the last clear.
///
/// Snapshots clone that list, so restoring one drops every call made after it.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
    restores: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Draw calls currently visible on the surface.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Visible draw calls other than clears.
    pub fn shapes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear(_)))
    }

    /// Number of snapshot restores so far.
    pub fn restores(&self) -> usize {
        self.restores
    }
}

impl Surface for RecordingSurface {
    type Snapshot = Vec<DrawCommand>;

    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, background: Color) -> SurfaceResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(background.into()));
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) -> SurfaceResult<()> {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color: color.into(),
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &BezPath, stroke: &Stroke, color: Color) -> SurfaceResult<()> {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            width: stroke.width,
            color: color.into(),
        });
        Ok(())
    }

    fn snapshot(&self) -> SurfaceResult<Self::Snapshot> {
        Ok(self.commands.clone())
    }

    fn restore(&mut self, snapshot: &Self::Snapshot) -> SurfaceResult<()> {
        self.restores += 1;
        self.commands.clone_from(snapshot);
        Ok(())
    }
}
