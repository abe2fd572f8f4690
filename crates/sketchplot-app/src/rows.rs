//! History list shown next to the canvas.

use serde::Serialize;
use sketchplot_core::shapes::{ShapeDescriptor, ShapeId, ShapeKind};

/// What the host needs to build one history row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Icon name, one per shape kind.
    pub icon: &'static str,
    /// `#rrggbb` value for the row's color picker.
    pub color: String,
    pub filled: bool,
    /// Whether the fill checkbox is shown.
    pub fillable: bool,
    pub label: String,
}

impl Row {
    pub fn from_descriptor(descriptor: &ShapeDescriptor) -> Self {
        Self {
            id: descriptor.id(),
            kind: descriptor.kind(),
            icon: descriptor.kind().name(),
            color: descriptor.style.color.to_hex(),
            filled: descriptor.style.filled,
            fillable: descriptor.shape.is_closed(),
            label: descriptor.to_string(),
        }
    }
}

/// Receiver of history list changes. Rows are kept in history order.
pub trait RowList {
    /// A shape was committed at the end of the history.
    fn row_appended(&mut self, row: Row);

    fn row_removed(&mut self, id: ShapeId);

    /// A row moved to a new index.
    fn row_moved(&mut self, id: ShapeId, index: usize);
}

/// Row list kept in memory, for hosts without a widget tree.
#[derive(Debug, Clone, Default)]
pub struct VecRowList {
    rows: Vec<Row>,
}

impl VecRowList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }
}

impl RowList for VecRowList {
    fn row_appended(&mut self, row: Row) {
        self.rows.push(row);
    }

    fn row_removed(&mut self, id: ShapeId) {
        if let Some(i) = self.position(id) {
            self.rows.remove(i);
        }
    }

    fn row_moved(&mut self, id: ShapeId, index: usize) {
        if let Some(i) = self.position(id) {
            let row = self.rows.remove(i);
            let index = index.min(self.rows.len());
            self.rows.insert(index, row);
        }
    }
}
