//! Per-gesture state, created on pointer-down and dropped on release.

use draglist_core::{Point, TimerId};

use super::velocity::VelocityTracker;

/// The interaction mode of the drag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureMode {
    /// No gesture, or an ordinary scroll/click the host handles.
    Idle,
    /// Long-press drag reordering.
    Dragging,
    /// Swipe-to-delete tracking.
    Deleting,
}

/// State of a drag in progress.
#[derive(Debug)]
pub(crate) struct DragState<S> {
    /// Position the dragged item currently occupies.
    pub from: usize,
    /// Last valid position under the pointer.
    pub to: usize,
    /// Pointer offset from the row's top-left corner at drag start.
    pub touch_offset: Point,
    pub item_height: f32,
    /// Global vertical bounds for the overlay.
    pub min_y: f32,
    pub max_y: f32,
    /// Global x of the overlay, fixed for the whole drag.
    pub overlay_x: f32,
    /// Owned for the lifetime of the drag; dropping it releases the capture.
    pub snapshot: S,
    pub hide_timer: Option<TimerId>,
}

impl<S> DragState<S> {
    /// Clamp a global overlay y into the drag bounds. The lower bound wins
    /// when the bounds cross.
    pub fn clamp_y(&self, y: f32) -> f32 {
        if y < self.min_y {
            self.min_y
        } else if y > self.max_y {
            self.max_y
        } else {
            y
        }
    }
}

/// State of a swipe-to-delete in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DeleteState {
    pub position: usize,
    /// Opacity of the row before the gesture touched it.
    pub base_alpha: f32,
    pub width: f32,
    pub scroll_x: f32,
}

#[derive(Debug)]
pub(crate) enum SessionMode<S> {
    Idle { scrolling: bool },
    Dragging(DragState<S>),
    Deleting(DeleteState),
}

/// Everything one pointer gesture knows about itself.
#[derive(Debug)]
pub(crate) struct GestureSession<S> {
    pub origin: Point,
    pub current: Point,
    /// Position under the origin. Always a valid data row.
    pub anchor: usize,
    /// Set by a long-click during this gesture; disables delete detection.
    pub long_click_flag: bool,
    pub velocity: VelocityTracker,
    pub mode: SessionMode<S>,
}

impl<S> GestureSession<S> {
    pub fn new(origin: Point, anchor: usize) -> Self {
        Self {
            origin,
            current: origin,
            anchor,
            long_click_flag: false,
            velocity: VelocityTracker::new(),
            mode: SessionMode::Idle { scrolling: false },
        }
    }

    pub fn gesture_mode(&self) -> GestureMode {
        match self.mode {
            SessionMode::Idle { .. } => GestureMode::Idle,
            SessionMode::Dragging(_) => GestureMode::Dragging,
            SessionMode::Deleting(_) => GestureMode::Deleting,
        }
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.mode, SessionMode::Idle { scrolling: true })
    }

    /// Leftward displacement from the origin, never negative.
    pub fn scroll_x(&self) -> f32 {
        (self.origin.x - self.current.x).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let session: GestureSession<()> = GestureSession::new(Point::new(10.0, 20.0), 3);
        assert_eq!(session.gesture_mode(), GestureMode::Idle);
        assert!(!session.is_scrolling());
        assert_eq!(session.scroll_x(), 0.0);
    }

    #[test]
    fn test_scroll_x_ignores_rightward_motion() {
        let mut session: GestureSession<()> = GestureSession::new(Point::new(100.0, 0.0), 0);
        session.current = Point::new(140.0, 0.0);
        assert_eq!(session.scroll_x(), 0.0);
        session.current = Point::new(30.0, 0.0);
        assert_eq!(session.scroll_x(), 70.0);
    }

    #[test]
    fn test_clamp_prefers_lower_bound() {
        let drag = DragState {
            from: 0,
            to: 0,
            touch_offset: Point::ZERO,
            item_height: 40.0,
            min_y: 100.0,
            max_y: 50.0,
            overlay_x: 0.0,
            snapshot: (),
            hide_timer: None,
        };
        assert_eq!(drag.clamp_y(75.0), 100.0);
        assert_eq!(drag.clamp_y(10.0), 100.0);
    }
}
