//! Pointer input consumed by the drag list.

use std::time::Instant;

use draglist_core::Point;

/// The phase of a single-pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The pointer touched down.
    Down,
    /// The pointer moved while down.
    Move,
    /// The pointer was lifted.
    Up,
    /// Another handler took the gesture over.
    Cancel,
}

/// A pointer event in list-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// Position relative to the list's top-left corner.
    pub pos: Point,
    /// When the event occurred. Drives velocity sampling.
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, pos: Point, timestamp: Instant) -> Self {
        Self {
            phase,
            pos,
            timestamp,
        }
    }

    pub fn down(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Down, Point::new(x, y), timestamp)
    }

    pub fn moved(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Move, Point::new(x, y), timestamp)
    }

    pub fn up(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Up, Point::new(x, y), timestamp)
    }

    pub fn cancel(x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Cancel, Point::new(x, y), timestamp)
    }
}
