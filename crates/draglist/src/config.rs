//! Tunables for the drag list state machine.
//!
//! [`DragListConfig`] can be built in code or loaded from TOML. Missing keys
//! fall back to their defaults.
//!
//! ```
//! use draglist::config::DragListConfig;
//!
//! let config = DragListConfig::from_toml_str("display_density = 2.0").unwrap();
//! assert_eq!(config.display_density, 2.0);
//! assert_eq!(config.settle_duration_ms, 250);
//! assert_eq!(config.delete_velocity_threshold(), -119.0);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use draglist_core::logging::targets;
use draglist_core::{DragListError, Result};

/// Default opacity of the floating drag snapshot.
pub const DEFAULT_SNAPSHOT_ALPHA: f32 = 0.8;

/// Default fraction of the row width where the drag handle zone begins.
///
/// A pointer-down right of this line starts a drag.
pub const DEFAULT_DRAG_HANDLE_START: f32 = 0.75;

/// Default leftward displacement in pixels that enters delete mode.
pub const DEFAULT_DELETE_MIN_DX: f32 = 10.0;

/// Default vertical tolerance in pixels for delete detection.
///
/// Vertical movement at or beyond this marks the gesture as a scroll.
pub const DEFAULT_DELETE_Y_SLOP: f32 = 10.0;

/// Default commit velocity, in density-independent pixels per 100 ms.
pub const DEFAULT_DELETE_VELOCITY_DP: f32 = -60.0;

/// Default release offset, as a fraction of row width, that commits a delete.
pub const DEFAULT_DELETE_COMMIT_FRACTION: f32 = 1.0 / 3.0;

/// Default settle duration in milliseconds for a full-width travel.
pub const DEFAULT_SETTLE_DURATION_MS: u64 = 250;

/// Default delay in milliseconds before the dragged row is hidden.
pub const DEFAULT_HIDE_DELAY_MS: u64 = 50;

/// Default maximum auto-scroll bias in pixels per move.
pub const DEFAULT_AUTO_SCROLL_BIAS: f32 = 10.0;

/// Default cap on the auto-scroll bias in pixels.
pub const DEFAULT_AUTO_SCROLL_MAX_DISTANCE: f32 = 30.0;

/// Configuration for a [`DragListView`](crate::widget::DragListView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragListConfig {
    /// Opacity of the floating drag snapshot.
    pub snapshot_alpha: f32,
    /// Fraction of the row width where the drag handle zone begins.
    pub drag_handle_start: f32,
    /// Leftward displacement in pixels that enters delete mode.
    pub delete_min_dx: f32,
    /// Vertical tolerance in pixels for delete detection.
    pub delete_y_slop: f32,
    /// Commit velocity in density-independent pixels per 100 ms.
    pub delete_velocity_dp: f32,
    /// Physical pixels per density-independent pixel.
    pub display_density: f32,
    /// Release offset, as a fraction of row width, that commits a delete.
    pub delete_commit_fraction: f32,
    /// Settle duration for a full-width travel.
    pub settle_duration_ms: u64,
    /// Delay before the dragged row is hidden behind its snapshot.
    pub hide_delay_ms: u64,
    /// Maximum auto-scroll bias in pixels per move.
    pub auto_scroll_bias: f32,
    /// Cap on the auto-scroll bias in pixels.
    pub auto_scroll_max_distance: f32,
}

impl Default for DragListConfig {
    fn default() -> Self {
        Self {
            snapshot_alpha: DEFAULT_SNAPSHOT_ALPHA,
            drag_handle_start: DEFAULT_DRAG_HANDLE_START,
            delete_min_dx: DEFAULT_DELETE_MIN_DX,
            delete_y_slop: DEFAULT_DELETE_Y_SLOP,
            delete_velocity_dp: DEFAULT_DELETE_VELOCITY_DP,
            display_density: 1.0,
            delete_commit_fraction: DEFAULT_DELETE_COMMIT_FRACTION,
            settle_duration_ms: DEFAULT_SETTLE_DURATION_MS,
            hide_delay_ms: DEFAULT_HIDE_DELAY_MS,
            auto_scroll_bias: DEFAULT_AUTO_SCROLL_BIAS,
            auto_scroll_max_distance: DEFAULT_AUTO_SCROLL_MAX_DISTANCE,
        }
    }
}

impl DragListConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| DragListError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| DragListError::io(path, source))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: targets::GESTURE, path = %path.display(), "loaded drag list config");
        Ok(config)
    }

    /// Serializes to a pretty-printed TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DragListError::config(e.to_string()))
    }

    /// Commit velocity in physical pixels per 100 ms.
    ///
    /// Rounded the way density conversion rounds: add one half, then truncate
    /// toward zero. With the defaults this is `-59.0`.
    pub fn delete_velocity_threshold(&self) -> f32 {
        ((self.display_density * self.delete_velocity_dp + 0.5) as i32) as f32
    }

    /// Settle duration for a full-width travel.
    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    /// Delay before the dragged row is hidden.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// The auto-scroll bias actually applied, after the distance cap.
    pub fn effective_auto_scroll_bias(&self) -> f32 {
        self.auto_scroll_bias.min(self.auto_scroll_max_distance)
    }

    /// Checks every field for a usable value.
    pub fn validate(&self) -> Result<()> {
        fn fraction(name: &str, value: f32) -> Result<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(DragListError::config(format!(
                    "{name} must be in (0, 1], got {value}"
                )))
            }
        }

        fn non_negative(name: &str, value: f32) -> Result<()> {
            if value >= 0.0 {
                Ok(())
            } else {
                Err(DragListError::config(format!(
                    "{name} must not be negative, got {value}"
                )))
            }
        }

        if self.display_density.is_nan() || self.display_density <= 0.0 {
            return Err(DragListError::config(format!(
                "display_density must be positive, got {}",
                self.display_density
            )));
        }
        fraction("snapshot_alpha", self.snapshot_alpha)?;
        fraction("drag_handle_start", self.drag_handle_start)?;
        fraction("delete_commit_fraction", self.delete_commit_fraction)?;
        non_negative("delete_min_dx", self.delete_min_dx)?;
        non_negative("delete_y_slop", self.delete_y_slop)?;
        non_negative("auto_scroll_bias", self.auto_scroll_bias)?;
        non_negative("auto_scroll_max_distance", self.auto_scroll_max_distance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = DragListConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delete_velocity_threshold(), -59.0);
        assert_eq!(config.effective_auto_scroll_bias(), 10.0);
        assert_eq!(config.settle_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = DragListConfig::from_toml_str(
            r#"
            hide_delay_ms = 80
            auto_scroll_max_distance = 4.0
            "#,
        )
        .unwrap();

        assert_eq!(config.hide_delay_ms, 80);
        assert_eq!(config.effective_auto_scroll_bias(), 4.0);
        assert_eq!(config.snapshot_alpha, DEFAULT_SNAPSHOT_ALPHA);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = DragListConfig::from_toml_str("display_density = 0.0").unwrap_err();
        assert!(err.to_string().contains("display_density"));

        let err = DragListConfig::from_toml_str("delete_commit_fraction = 1.5").unwrap_err();
        assert!(err.to_string().contains("delete_commit_fraction"));

        let err = DragListConfig::from_toml_str("delete_min_dx = -1.0").unwrap_err();
        assert!(err.to_string().contains("delete_min_dx"));
    }

    #[test]
    fn test_malformed_document() {
        let err = DragListConfig::from_toml_str("snapshot_alpha = \"opaque\"").unwrap_err();
        assert!(matches!(err, DragListError::Config { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DragListConfig {
            display_density: 3.0,
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(DragListConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "display_density = 2.0").unwrap();

        let config = DragListConfig::load(file.path()).unwrap();
        assert_eq!(config.delete_velocity_threshold(), -119.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DragListConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, DragListError::Io { .. }));
    }
}
