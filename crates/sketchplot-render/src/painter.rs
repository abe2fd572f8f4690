//! History replay and raster snapshot lifecycle.

use crate::surface::{Surface, SurfaceResult};
use kurbo::Stroke;
use peniko::Color;
use sketchplot_core::canvas::{Canvas, Frame};
use sketchplot_core::shapes::ShapeDescriptor;

/// Canvas background.
pub const BACKGROUND: Color = Color::WHITE;

/// Paints canvas frames onto a surface.
///
/// Full redraws replay every committed entry and recapture the snapshot; previews
/// restore the snapshot and paint one transient shape over it.
pub struct Painter<S: Surface> {
    surface: S,
    snapshot: Option<S::Snapshot>,
}

impl<S: Surface> Painter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            snapshot: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Whether a snapshot is held.
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Forget the snapshot, e.g. after the surface was resized.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Apply one frame produced by the canvas.
    pub fn present(&mut self, frame: &Frame, canvas: &Canvas) -> SurfaceResult<()> {
        match frame {
            Frame::Unchanged => Ok(()),
            Frame::Overlay(descriptor) => {
                self.restore()?;
                self.paint(descriptor)
            }
            Frame::Restore => self.restore(),
            Frame::Redraw => {
                self.redraw(canvas.committed())?;
                // A gesture in progress stays visible but out of the snapshot.
                match canvas.provisional() {
                    Some(provisional) => self.paint(provisional),
                    None => Ok(()),
                }
            }
        }
    }

    /// Repaint the background and every descriptor in order, then recapture.
    pub fn redraw<'a>(
        &mut self,
        descriptors: impl IntoIterator<Item = &'a ShapeDescriptor>,
    ) -> SurfaceResult<()> {
        self.surface.clear(BACKGROUND)?;
        let mut count = 0;
        for descriptor in descriptors {
            self.paint(descriptor)?;
            count += 1;
        }
        self.snapshot = Some(self.surface.snapshot()?);
        log::trace!("redrew {count} shapes");
        Ok(())
    }

    /// Put the snapshot back, capturing it first if none is held.
    pub fn restore(&mut self) -> SurfaceResult<()> {
        match &self.snapshot {
            Some(snapshot) => self.surface.restore(snapshot),
            None => {
                self.snapshot = Some(self.surface.snapshot()?);
                Ok(())
            }
        }
    }

    /// Paint a single descriptor: filled shapes are filled, everything else stroked.
    pub fn paint(&mut self, descriptor: &ShapeDescriptor) -> SurfaceResult<()> {
        let path = descriptor.shape.to_path();
        let color: Color = descriptor.display_color().into();
        if descriptor.style.filled && descriptor.shape.is_closed() {
            self.surface.fill_path(&path, color)
        } else {
            let stroke = Stroke::new(descriptor.style.stroke_width);
            self.surface.stroke_path(&path, &stroke, color)
        }
    }
}
