//! Application glue: canvas session, painter and history list.

use crate::rows::{Row, RowList};
use kurbo::Size;
use sketchplot_core::canvas::{Canvas, Response};
use sketchplot_core::color::Rgb;
use sketchplot_core::input::{KeyEvent, PointerEvent};
use sketchplot_core::options::ToolOptions;
use sketchplot_core::shapes::{ShapeId, ShapeKind};
use sketchplot_render::{Painter, Surface, SurfaceResult};

/// A drawing session bound to a surface and a row list.
pub struct App<S: Surface, R: RowList> {
    canvas: Canvas,
    painter: Painter<S>,
    rows: R,
}

impl<S: Surface, R: RowList> App<S, R> {
    /// Create a session and paint the empty background.
    pub fn new(surface: S, rows: R) -> SurfaceResult<Self> {
        Self::with_options(surface, rows, ToolOptions::default())
    }

    pub fn with_options(surface: S, rows: R, options: ToolOptions) -> SurfaceResult<Self> {
        let canvas = Canvas::with_options(surface.size(), options);
        let mut painter = Painter::new(surface);
        painter.redraw(canvas.committed())?;
        log::info!(
            "canvas ready ({}x{})",
            canvas.size().width,
            canvas.size().height
        );
        Ok(Self {
            canvas,
            painter,
            rows,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn rows(&self) -> &R {
        &self.rows
    }

    pub fn surface(&self) -> &S {
        self.painter.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.painter.surface_mut()
    }

    pub fn pointer(&mut self, event: &PointerEvent) -> SurfaceResult<()> {
        let response = self.canvas.handle_pointer(event);
        self.apply(response)
    }

    pub fn key(&mut self, event: &KeyEvent) -> SurfaceResult<()> {
        let response = self.canvas.handle_key(event);
        self.apply(response)
    }

    pub fn cancel(&mut self) -> SurfaceResult<()> {
        let response = self.canvas.cancel();
        self.apply(response)
    }

    pub fn set_options(&mut self, options: ToolOptions) -> SurfaceResult<()> {
        let response = self.canvas.set_options(options);
        self.apply(response)
    }

    pub fn set_tool(&mut self, tool: ShapeKind) -> SurfaceResult<()> {
        let response = self.canvas.set_tool(tool);
        self.apply(response)
    }

    pub fn set_filled(&mut self, id: ShapeId, filled: bool) -> SurfaceResult<()> {
        let response = self.canvas.set_filled(id, filled);
        self.apply(response)
    }

    pub fn set_color(&mut self, id: ShapeId, color: Rgb) -> SurfaceResult<()> {
        let response = self.canvas.set_color(id, color);
        self.apply(response)
    }

    pub fn set_hovered(&mut self, id: ShapeId, hovered: bool) -> SurfaceResult<()> {
        let response = self.canvas.set_hovered(id, hovered);
        self.apply(response)
    }

    pub fn move_row(&mut self, id: ShapeId, offset: isize) -> SurfaceResult<()> {
        let (response, target) = self.canvas.move_by(id, offset);
        if let Some(index) = target {
            self.rows.row_moved(id, index);
        }
        self.apply(response)
    }

    pub fn remove_row(&mut self, id: ShapeId) -> SurfaceResult<()> {
        let (response, removed) = self.canvas.remove(id);
        if let Some((index, descriptor)) = removed {
            log::debug!("removed row {index}: {descriptor}");
            self.rows.row_removed(id);
        }
        self.apply(response)
    }

    /// Match a new surface size and repaint.
    pub fn resize(&mut self, size: Size) -> SurfaceResult<()> {
        self.canvas.set_size(size);
        self.painter.invalidate();
        self.painter.redraw(self.canvas.committed())
    }

    pub fn export(&self) -> String {
        self.canvas.export_octave()
    }

    fn apply(&mut self, response: Response) -> SurfaceResult<()> {
        if let Some(descriptor) = response.committed.and_then(|id| self.canvas.get(id)) {
            self.rows.row_appended(Row::from_descriptor(descriptor));
        }
        self.painter.present(&response.frame, &self.canvas)
    }
}
