//! Data models backing a drag list.
//!
//! - [`ItemModel`]: read access plus change signals
//! - [`ReorderModel`]: the swap/remove/insert capability a drag list requires
//! - [`ListStore`]: the in-memory model that implements both
//! - [`ModelSignals`]: the signals every model emits
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use draglist::model::{ItemModel, ListStore};
//!
//! let store = Arc::new(ListStore::new(vec!["milk", "eggs", "bread"]));
//! store.signals().rows_removed.connect(|&(first, _)| {
//!     println!("row {first} removed");
//! });
//!
//! let model: Arc<dyn ItemModel<&str>> = store.clone();
//! assert!(model.as_reorderable().is_some());
//! ```

mod list_store;
mod traits;

pub use list_store::ListStore;
pub use traits::{DataMutation, ItemModel, ModelSignals, ReorderModel};
