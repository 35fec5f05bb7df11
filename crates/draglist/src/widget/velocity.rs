//! Horizontal velocity sampling for delete flings.
//!
//! Uses the impulse strategy: each segment between consecutive samples
//! contributes kinetic energy, and the accumulated energy is converted back
//! to a velocity. Only samples in the trailing 100 ms window count, and a
//! gap of more than 40 ms between two samples means the pointer had stopped.

use std::time::{Duration, Instant};

const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest, are ignored.
pub const HORIZON: Duration = Duration::from_millis(100);

/// A gap longer than this between consecutive samples ends the window.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy)]
struct Sample {
    time: Instant,
    x: f32,
}

/// Tracks the horizontal velocity of a single pointer.
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record the pointer's x position at `time`.
    pub fn add_sample(&mut self, time: Instant, x: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time, x });
    }

    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }

    /// Velocity in pixels per second. Zero with fewer than two usable samples.
    pub fn velocity_per_second(&self) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        // Oldest-first positions and times (ms, relative to newest, <= 0).
        let mut xs = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[cursor] {
            let age = newest.time.saturating_duration_since(sample.time);
            let gap = previous.time.saturating_duration_since(sample.time);
            if age > HORIZON || gap > ASSUME_STOPPED {
                break;
            }

            xs[count] = sample.x;
            times[count] = -(age.as_secs_f32() * 1000.0);
            previous = sample;
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            cursor = cursor.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&xs[..count], &times[..count]) * 1000.0
    }

    /// Velocity in pixels per 100 ms, the unit delete thresholds use.
    pub fn velocity_per_100ms(&self) -> f32 {
        self.velocity_per_second() / 10.0
    }
}

/// `xs` and `times` run newest-first.
fn impulse_velocity(xs: &[f32], times: &[f32]) -> f32 {
    let start = xs.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (xs[i] - xs[i - 1]) / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
