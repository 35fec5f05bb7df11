//! Model traits and change notification.

use draglist_core::{Result, Signal};

/// Read access to an ordered, index-addressable item collection.
///
/// Row 0 is the first data row; header rows of the surface are not part of
/// the model.
///
/// A model that can also be reordered exposes that through
/// [`as_reorderable`](Self::as_reorderable). The drag list refuses models
/// that don't.
pub trait ItemModel<T>: Send + Sync {
    /// Number of rows in the model.
    fn row_count(&self) -> usize;

    /// A copy of the item at `row`, or `None` if out of range.
    fn item(&self, row: usize) -> Option<T>;

    /// Signals for change notification.
    fn signals(&self) -> &ModelSignals;

    /// The mutation capability of this model, if it has one.
    fn as_reorderable(&self) -> Option<&dyn ReorderModel<T>> {
        None
    }
}

/// The swap/remove/insert capability a drag list needs from its model.
///
/// Every method must notify observers through [`ItemModel::signals`]
/// before returning.
pub trait ReorderModel<T>: ItemModel<T> {
    /// Exchange the items at rows `a` and `b`.
    fn swap_rows(&self, a: usize, b: usize) -> Result<()>;

    /// Remove and return the item at `row`.
    fn remove_row(&self, row: usize) -> Result<T>;

    /// Insert `item` so that it ends up at `row`. `row == row_count()` appends.
    fn insert_row(&self, row: usize, item: T) -> Result<()>;

    /// Replace the whole collection.
    fn replace_all(&self, items: Vec<T>);
}

/// A completed mutation, as reported by the drag list's `data_mutated` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMutation {
    /// Rows `a` and `b` exchanged places.
    Swapped { a: usize, b: usize },
    /// The row at `row` was removed.
    Removed { row: usize },
    /// A row was inserted at `row`.
    Inserted { row: usize },
    /// The collection was replaced and now holds `len` rows.
    Reset { len: usize },
}

/// Signals emitted by item models.
///
/// Structural signals fire first; `data_changed` fires last for every
/// mutation, so a surface only needs that one to know its rows are stale.
pub struct ModelSignals {
    /// Emitted after two rows were swapped.
    /// Args: (row a, row b)
    pub rows_swapped: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,

    /// Emitted after any mutation.
    pub data_changed: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    pub fn new() -> Self {
        Self {
            rows_swapped: Signal::new(),
            rows_inserted: Signal::new(),
            rows_removed: Signal::new(),
            model_reset: Signal::new(),
            data_changed: Signal::new(),
        }
    }

    /// Runs `swap_fn`, then emits `rows_swapped` and `data_changed`.
    pub fn emit_rows_swapped<F: FnOnce()>(&self, a: usize, b: usize, swap_fn: F) {
        swap_fn();
        self.rows_swapped.emit((a, b));
        self.data_changed.emit(());
    }

    /// Runs `insert_fn`, then emits `rows_inserted` and `data_changed`.
    pub fn emit_rows_inserted<F: FnOnce()>(&self, first: usize, last: usize, insert_fn: F) {
        insert_fn();
        self.rows_inserted.emit((first, last));
        self.data_changed.emit(());
    }

    /// Runs `remove_fn`, then emits `rows_removed` and `data_changed`.
    pub fn emit_rows_removed<F: FnOnce()>(&self, first: usize, last: usize, remove_fn: F) {
        remove_fn();
        self.rows_removed.emit((first, last));
        self.data_changed.emit(());
    }

    /// Runs `reset_fn`, then emits `model_reset` and `data_changed`.
    pub fn emit_reset<F: FnOnce()>(&self, reset_fn: F) {
        reset_fn();
        self.model_reset.emit(());
        self.data_changed.emit(());
    }
}
