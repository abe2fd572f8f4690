//! Ordered draw history.

use crate::shapes::{ShapeDescriptor, ShapeId};

/// Committed shapes in paint order (back to front).
///
/// Holds no render state; every mutation is expected to be followed by a full replay.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<ShapeDescriptor>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of everything else.
    pub fn append(&mut self, descriptor: ShapeDescriptor) {
        self.entries.push(descriptor);
    }

    /// Remove the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<ShapeDescriptor> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Remove the topmost entry.
    pub fn pop(&mut self) -> Option<ShapeDescriptor> {
        self.entries.pop()
    }

    /// Move the entry at `index` by `offset` places.
    ///
    /// Returns false (and leaves the order untouched) when either position is out of range.
    pub fn move_by(&mut self, index: usize, offset: isize) -> bool {
        let Some(target) = index.checked_add_signed(offset) else {
            return false;
        };
        if index >= self.entries.len() || target >= self.entries.len() {
            return false;
        }
        if target != index {
            let entry = self.entries.remove(index);
            self.entries.insert(target, entry);
        }
        true
    }

    /// Replace the entry at `index`, returning the previous one.
    pub fn replace_at(
        &mut self,
        index: usize,
        descriptor: ShapeDescriptor,
    ) -> Option<ShapeDescriptor> {
        self.entries
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, descriptor))
    }

    /// Replace the topmost entry, returning the previous one.
    pub fn replace_last(&mut self, descriptor: ShapeDescriptor) -> Option<ShapeDescriptor> {
        let last = self.entries.len().checked_sub(1)?;
        self.replace_at(last, descriptor)
    }

    pub fn get(&self, index: usize) -> Option<&ShapeDescriptor> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ShapeDescriptor> {
        self.entries.get_mut(index)
    }

    pub fn last(&self) -> Option<&ShapeDescriptor> {
        self.entries.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut ShapeDescriptor> {
        self.entries.last_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &ShapeDescriptor> {
        self.entries.iter()
    }

    /// Store index of the entry with the given id.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.entries.iter().position(|d| d.id() == id)
    }

    /// Store index of an entry that must exist.
    ///
    /// # Panics
    ///
    /// Panics if no entry has `id`; a history row without a matching entry means the row
    /// list and the store have diverged.
    pub fn expect_index(&self, id: ShapeId) -> usize {
        match self.index_of(id) {
            Some(index) => index,
            None => panic!("history row {id} has no matching entry"),
        }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a ShapeDescriptor;
    type IntoIter = std::slice::Iter<'a, ShapeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
