//! Logging facilities for draglist.
//!
//! draglist instruments itself with the `tracing` crate and never installs a
//! subscriber. To see its output, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("draglist::gesture=debug,draglist::model=debug")
//!     .init();
//! ```
//!
//! Gesture mode transitions log at `debug`, per-move detail at `trace`, and
//! an invariant violation logs at `error` right before the panic it causes.

/// Span names used for tracing.
pub mod span_names {
    /// Pointer event dispatch.
    pub const POINTER: &str = "draglist::pointer";
    /// Settle animation sampling.
    pub const SETTLE: &str = "draglist::settle";
    /// Performance measurement spans.
    pub const PERF: &str = "draglist::perf";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "draglist_core";
    /// Signal emission.
    pub const SIGNAL: &str = "draglist_core::signal";
    /// Deferred timers.
    pub const TIMER: &str = "draglist_core::timer";
    /// Data store mutations.
    pub const MODEL: &str = "draglist::model";
    /// Gesture state machine.
    pub const GESTURE: &str = "draglist::gesture";
    /// Settle and fade animations.
    pub const ANIMATION: &str = "draglist::animation";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure how long a single pointer dispatch takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("draglist=trace")
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::debug!(target: targets::CORE, value = 1, "inside perf span");
        });
    }

    #[test]
    fn test_targets_share_crate_prefix() {
        for target in [targets::MODEL, targets::GESTURE, targets::ANIMATION] {
            assert!(target.starts_with("draglist::"));
        }
        assert!(targets::TIMER.starts_with(targets::CORE));
    }
}
