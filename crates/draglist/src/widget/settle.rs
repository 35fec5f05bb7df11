//! The post-release slide of a row being deleted.

use std::time::{Duration, Instant};

use draglist_core::{lerp, lerp_int, percent_of_range};

/// One sampled frame of a [`SettleAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleFrame {
    /// Horizontal scroll offset to apply to the row.
    pub offset: f32,
    /// Whether the animation reached its end with this frame.
    pub finished: bool,
}

/// A linear slide of a row's horizontal offset from its release position to
/// its full width, after which the row is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SettleAnimation {
    /// Surface position of the row.
    pub position: usize,
    /// Opacity to restore if the row survives visually until removal.
    pub restore_alpha: f32,
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl SettleAnimation {
    /// Slide the row at `position` from `scroll_x` to `width`.
    ///
    /// A full-width travel takes `full_duration`; shorter remaining travel
    /// takes proportionally less.
    pub fn commit(
        position: usize,
        scroll_x: f32,
        width: f32,
        restore_alpha: f32,
        start: Instant,
        full_duration: Duration,
    ) -> Self {
        Self {
            position,
            restore_alpha,
            from: scroll_x,
            to: width,
            start,
            duration: scaled_duration(full_duration, scroll_x, width),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// When the last frame is due.
    pub fn deadline(&self) -> Instant {
        self.start + self.duration
    }

    /// The frame at `now`.
    pub fn sample(&self, now: Instant) -> SettleFrame {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };

        SettleFrame {
            offset: lerp(self.from, self.to, progress),
            finished: progress >= 1.0,
        }
    }
}

/// Duration for the remaining travel from `scroll_x` to `width`, truncated to
/// whole milliseconds. An offset beyond the row settles immediately.
fn scaled_duration(full: Duration, scroll_x: f32, width: f32) -> Duration {
    let remaining = width - scroll_x;
    let Some(travelled) = percent_of_range(width, 0.0, remaining) else {
        return Duration::ZERO;
    };
    let full_ms = i32::try_from(full.as_millis()).unwrap_or(i32::MAX);
    let ms = lerp_int(full_ms, 0, travelled).max(0);
    Duration::from_millis(ms as u64)
}
