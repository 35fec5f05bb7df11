//! An ordered in-memory item store.

use parking_lot::RwLock;

use draglist_core::logging::targets;
use draglist_core::{DragListError, Result};

use super::traits::{ItemModel, ModelSignals, ReorderModel};

/// An ordered collection of items whose index order is the display order.
///
/// Every mutation notifies observers synchronously before returning. The
/// store holds no other ordering invariant.
///
/// # Example
///
/// ```
/// use draglist::model::ListStore;
///
/// let store = ListStore::new(vec!["a", "b", "c"]);
/// store.signals().data_changed.connect(|_| println!("rows are stale"));
///
/// store.swap(0, 2);
/// assert_eq!(store.to_vec(), vec!["c", "b", "a"]);
/// ```
pub struct ListStore<T> {
    items: RwLock<Vec<T>>,
    signals: ModelSignals,
}

impl<T: Send + Sync + 'static> ListStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: ModelSignals::new(),
        }
    }

    /// Creates an empty store.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the change notification signals.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    /// Returns a read guard over the items.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Swaps the items at `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= len()`.
    pub fn swap(&self, a: usize, b: usize) {
        if let Err(err) = self.try_swap(a, b) {
            panic!("{err}");
        }
    }

    /// Swaps the items at `a` and `b`, or reports which index was out of range.
    pub fn try_swap(&self, a: usize, b: usize) -> Result<()> {
        let len = self.len();
        for index in [a, b] {
            if index >= len {
                return Err(DragListError::out_of_range("swap", index, len));
            }
        }
        self.signals.emit_rows_swapped(a, b, || {
            self.items.write().swap(a, b);
        });
        tracing::trace!(target: targets::MODEL, a, b, "rows swapped");
        Ok(())
    }

    /// Removes and returns the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove_at(&self, index: usize) -> T {
        match self.try_remove_at(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }

    /// Removes and returns the item at `index`, or reports an out-of-range index.
    pub fn try_remove_at(&self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(DragListError::out_of_range("remove", index, len));
        }
        let mut removed = None;
        self.signals.emit_rows_removed(index, index, || {
            removed = Some(self.items.write().remove(index));
        });
        tracing::trace!(target: targets::MODEL, index, "row removed");
        removed.ok_or_else(|| DragListError::out_of_range("remove", index, len))
    }

    /// Inserts `item` at `index`, shifting later items down.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_at(&self, index: usize, item: T) {
        if let Err(err) = self.try_insert_at(index, item) {
            panic!("{err}");
        }
    }

    /// Inserts `item` at `index`, or reports an out-of-range index.
    pub fn try_insert_at(&self, index: usize, item: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(DragListError::out_of_range("insert", index, len));
        }
        self.signals.emit_rows_inserted(index, index, || {
            self.items.write().insert(index, item);
        });
        tracing::trace!(target: targets::MODEL, index, "row inserted");
        Ok(())
    }

    /// Appends an item to the end.
    pub fn push(&self, item: T) {
        let row = self.len();
        self.signals.emit_rows_inserted(row, row, || {
            self.items.write().push(item);
        });
    }

    /// Replaces every item.
    pub fn replace_all(&self, items: Vec<T>) {
        let len = items.len();
        self.signals.emit_reset(|| {
            *self.items.write() = items;
        });
        tracing::debug!(target: targets::MODEL, len, "store reset");
    }
}

impl<T: Clone + Send + Sync + 'static> ListStore<T> {
    /// Returns a copy of the item at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a copy of every item, in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T: Send + Sync + 'static> Default for ListStore<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + Send + Sync + 'static> ItemModel<T> for ListStore<T> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn item(&self, row: usize) -> Option<T> {
        self.get(row)
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn as_reorderable(&self) -> Option<&dyn ReorderModel<T>> {
        Some(self)
    }
}

impl<T: Clone + Send + Sync + 'static> ReorderModel<T> for ListStore<T> {
    fn swap_rows(&self, a: usize, b: usize) -> Result<()> {
        self.try_swap(a, b)
    }

    fn remove_row(&self, row: usize) -> Result<T> {
        self.try_remove_at(row)
    }

    fn insert_row(&self, row: usize, item: T) -> Result<()> {
        self.try_insert_at(row, item)
    }

    fn replace_all(&self, items: Vec<T>) {
        ListStore::replace_all(self, items);
    }
}

static_assertions::assert_impl_all!(ListStore<String>: Send, Sync);
