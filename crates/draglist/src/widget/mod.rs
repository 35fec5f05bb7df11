//! The drag list widget and the pieces it is built from.
//!
//! - [`DragListView`]: the gesture state machine
//! - [`ListSurface`]: the host list the view drives
//! - [`PointerEvent`]: single-pointer input
//! - [`VelocityTracker`]: horizontal fling velocity
//! - [`SettleAnimation`]: the slide-out after a committed delete

mod drag_list;
mod events;
mod session;
mod settle;
mod surface;
pub mod velocity;

pub use drag_list::{DragListView, delete_alpha};
pub use events::{PointerEvent, PointerPhase};
pub use session::GestureMode;
pub use settle::{SettleAnimation, SettleFrame};
pub use surface::ListSurface;
pub use velocity::VelocityTracker;
