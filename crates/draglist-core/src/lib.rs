//! Core systems for draglist.
//!
//! This crate provides the plumbing the list component is built on:
//!
//! - **Signal/Slot System**: synchronous observer notification
//! - **Timers**: one-shot deferred actions driven by an explicit clock
//! - **Geometry**: points, sizes and rectangles in pixel space
//! - **Interpolation**: percentage-of-range and linear interpolation
//! - **Errors**: the shared [`DragListError`] taxonomy
//!
//! # Signal/Slot Example
//!
//! ```
//! use draglist_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//! let conn_id = count_changed.connect(|count| {
//!     println!("now {} rows", count);
//! });
//! count_changed.emit(4);
//! count_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use draglist_core::TimerManager;
//!
//! let start = Instant::now();
//! let mut timers = TimerManager::new();
//! timers.start_one_shot(start, Duration::from_millis(50), "hide row");
//!
//! let fired = timers.process_expired(start + Duration::from_millis(60));
//! assert_eq!(fired.len(), 1);
//! ```

mod error;
pub mod geometry;
pub mod interpolate;
pub mod logging;
pub mod signal;
mod timer;

pub use error::{DragListError, Result};
pub use geometry::{Point, Rect, Size};
pub use interpolate::{lerp, lerp_int, percent_of_range};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
