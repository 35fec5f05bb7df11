//! Prelude module for draglist.
//!
//! ```ignore
//! use draglist::prelude::*;
//! ```

pub use crate::config::DragListConfig;
pub use crate::model::{DataMutation, ItemModel, ListStore, ModelSignals, ReorderModel};
pub use crate::widget::{DragListView, GestureMode, ListSurface, PointerEvent, PointerPhase};

pub use draglist_core::{DragListError, Point, Rect, Result, Signal, Size};
