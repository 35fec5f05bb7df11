//! draglist - a list component with long-press drag reordering and
//! swipe-to-delete, layered over a host list surface.
//!
//! This crate re-exports `draglist-core` and adds the data model, the
//! gesture state machine and its configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use draglist::prelude::*;
//!
//! let store = Arc::new(ListStore::new(vec!["one", "two", "three"]));
//! let mut list = DragListView::new(my_surface, DragListConfig::default())
//!     .with_model(store.clone())?;
//!
//! list.item_clicked.connect(|row| println!("clicked row {row}"));
//! ```

pub use draglist_core::*;

pub mod config;
pub mod model;
pub mod prelude;
pub mod widget;
