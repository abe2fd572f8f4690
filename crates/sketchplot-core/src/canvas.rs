//! Drawing session: history, tool state and options behind one value.

use crate::color::Rgb;
use crate::history::History;
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::options::ToolOptions;
use crate::shapes::{ShapeDescriptor, ShapeId, ShapeKind};
use crate::snap::snap_pointer;
use crate::tools::{ToolManager, ToolOutcome};
use kurbo::{Point, Size};

/// What the surface has to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Nothing visible changed.
    Unchanged,
    /// Restore the last raster snapshot and paint one transient shape over it.
    Overlay(ShapeDescriptor),
    /// Restore the last raster snapshot.
    Restore,
    /// Repaint the background and replay the whole history.
    Redraw,
}

/// Result of feeding an event to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub frame: Frame,
    /// Set when a gesture committed a new history entry.
    pub committed: Option<ShapeId>,
}

impl Response {
    fn frame(frame: Frame) -> Self {
        Self {
            frame,
            committed: None,
        }
    }

    fn unchanged() -> Self {
        Self::frame(Frame::Unchanged)
    }
}

/// A drawing session.
#[derive(Debug, Clone)]
pub struct Canvas {
    history: History,
    tools: ToolManager,
    options: ToolOptions,
    size: Size,
}

impl Canvas {
    /// Create an empty session on a surface of the given size.
    pub fn new(size: Size) -> Self {
        Self::with_options(size, ToolOptions::default())
    }

    pub fn with_options(size: Size, options: ToolOptions) -> Self {
        Self {
            history: History::new(),
            tools: ToolManager::new(),
            options,
            size,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_active()
    }

    /// Replace the tool options. Switching tools mid-gesture cancels the gesture.
    pub fn set_options(&mut self, options: ToolOptions) -> Response {
        let tool_changed = options.tool != self.options.tool;
        self.options = options;
        if tool_changed && self.tools.is_active() {
            return self.cancel();
        }
        Response::unchanged()
    }

    pub fn set_tool(&mut self, tool: ShapeKind) -> Response {
        let options = ToolOptions {
            tool,
            ..self.options.clone()
        };
        self.set_options(options)
    }

    fn snap(&self, position: Point, modifiers: Modifiers) -> Point {
        snap_pointer(position, self.size, &self.options.grid, modifiers).point
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Response {
        match *event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => match button {
                MouseButton::Left => self.pointer_down(position, modifiers),
                MouseButton::Right => self.cancel(),
                MouseButton::Middle => Response::unchanged(),
            },
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(position, modifiers),
            PointerEvent::Up { button, .. } => match button {
                MouseButton::Left => self.pointer_up(),
                MouseButton::Right | MouseButton::Middle => Response::unchanged(),
            },
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) -> Response {
        if event.is_finish() {
            self.finish()
        } else {
            Response::unchanged()
        }
    }

    /// Gesture start.
    pub fn pointer_down(&mut self, position: Point, modifiers: Modifiers) -> Response {
        let point = self.snap(position, modifiers);
        let outcome = self.tools.begin(point, &self.options, &mut self.history);
        self.respond(outcome)
    }

    /// Pointer motion, with or without a held button.
    pub fn pointer_move(&mut self, position: Point, modifiers: Modifiers) -> Response {
        let point = self.snap(position, modifiers);
        if !self.tools.is_active() {
            let cursor =
                ShapeDescriptor::cursor(point, self.options.stroke_width, self.options.color);
            return Response::frame(Frame::Overlay(cursor));
        }
        let outcome = self.tools.update(point, &self.options, &mut self.history);
        self.respond(outcome)
    }

    /// Gesture end.
    pub fn pointer_up(&mut self) -> Response {
        let outcome = self.tools.end(&self.history);
        self.respond(outcome)
    }

    /// Finish signal for custom shapes.
    pub fn finish(&mut self) -> Response {
        if !self.tools.is_active() {
            log::warn!("finish signal with no custom shape in progress");
        }
        let outcome = self.tools.finish(&mut self.history);
        self.respond(outcome)
    }

    /// Cancel signal: drop the provisional entry and restore the pre-gesture raster.
    pub fn cancel(&mut self) -> Response {
        if let ToolOutcome::Discarded = self.tools.cancel(&mut self.history) {
            log::debug!("gesture cancelled");
        }
        Response::frame(Frame::Restore)
    }

    fn respond(&mut self, outcome: ToolOutcome) -> Response {
        match outcome {
            ToolOutcome::None | ToolOutcome::Provisional => Response::unchanged(),
            ToolOutcome::Preview(descriptor) => {
                log::trace!("preview {descriptor}");
                Response::frame(Frame::Overlay(descriptor))
            }
            ToolOutcome::Committed(id) => {
                if let Some(descriptor) = self.history.last() {
                    log::debug!("committed {descriptor}");
                }
                Response {
                    frame: Frame::Redraw,
                    committed: Some(id),
                }
            }
            ToolOutcome::Discarded => {
                log::debug!("gesture discarded");
                Response::frame(Frame::Restore)
            }
        }
    }

    /// Number of entries that are not provisional.
    pub fn committed_len(&self) -> usize {
        let provisional = usize::from(self.tools.has_provisional());
        self.history.len() - provisional
    }

    /// Committed entries in paint order.
    pub fn committed(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.history.iter().take(self.committed_len())
    }

    /// Octave script plotting every committed entry.
    pub fn export_octave(&self) -> String {
        crate::export::export_octave(self.committed(), self.size.height)
    }

    /// The entry of the gesture in progress, if it was pushed already.
    pub fn provisional(&self) -> Option<&ShapeDescriptor> {
        if self.tools.has_provisional() {
            self.history.last()
        } else {
            None
        }
    }

    /// Store index for a history row.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the history.
    pub fn index_of(&self, id: ShapeId) -> usize {
        self.history.expect_index(id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&ShapeDescriptor> {
        self.history.index_of(id).and_then(|i| self.history.get(i))
    }

    /// Index of a committed row. `None` for the provisional entry, which has no row.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the history.
    fn row_index(&self, id: ShapeId) -> Option<usize> {
        let index = self.history.expect_index(id);
        if index < self.committed_len() {
            Some(index)
        } else {
            log::debug!("ignoring row edit on provisional entry {id}");
            None
        }
    }

    fn row_mut(&mut self, id: ShapeId) -> Option<&mut ShapeDescriptor> {
        let index = self.row_index(id)?;
        self.history.get_mut(index)
    }

    /// Row fill toggle.
    pub fn set_filled(&mut self, id: ShapeId, filled: bool) -> Response {
        let changed = self.row_mut(id).is_some_and(|entry| entry.set_filled(filled));
        if changed {
            Response::frame(Frame::Redraw)
        } else {
            Response::unchanged()
        }
    }

    /// Row color edit.
    pub fn set_color(&mut self, id: ShapeId, color: Rgb) -> Response {
        match self.row_mut(id) {
            Some(entry) => {
                entry.style.color = color;
                Response::frame(Frame::Redraw)
            }
            None => Response::unchanged(),
        }
    }

    /// Row hover enter/leave.
    pub fn set_hovered(&mut self, id: ShapeId, hovered: bool) -> Response {
        match self.row_mut(id) {
            Some(entry) => {
                entry.hovered = hovered;
                Response::frame(Frame::Redraw)
            }
            None => Response::unchanged(),
        }
    }

    /// Row reorder. Returns the new index, or `None` when the move was out of range.
    pub fn move_by(&mut self, id: ShapeId, offset: isize) -> (Response, Option<usize>) {
        let Some(index) = self.row_index(id) else {
            return (Response::unchanged(), None);
        };
        let target = index
            .checked_add_signed(offset)
            .filter(|&t| t < self.committed_len());
        match target {
            Some(target) if self.history.move_by(index, offset) => {
                (Response::frame(Frame::Redraw), Some(target))
            }
            _ => (Response::unchanged(), None),
        }
    }

    /// Row delete. Returns the removed entry and its former index.
    pub fn remove(&mut self, id: ShapeId) -> (Response, Option<(usize, ShapeDescriptor)>) {
        let Some(index) = self.row_index(id) else {
            return (Response::unchanged(), None);
        };
        let removed = self.history.remove_at(index).map(|d| (index, d));
        (Response::frame(Frame::Redraw), removed)
    }
}
