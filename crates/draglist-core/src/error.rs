//! Error types for draglist.

use std::path::PathBuf;

/// A specialized Result type for draglist operations.
pub type Result<T> = std::result::Result<T, DragListError>;

/// The main error type for draglist operations.
#[derive(Debug, thiserror::Error)]
pub enum DragListError {
    /// A pointer coordinate does not resolve to an addressable item row.
    ///
    /// Gesture handlers recover from this locally by falling back to the
    /// host's default scroll behavior; it is never surfaced from them.
    #[error("No item row at ({x}, {y})")]
    InvalidPosition { x: f32, y: f32 },

    /// The attached data source does not provide the swap/remove/insert
    /// capability the drag list needs.
    #[error("Model rejected: {reason}")]
    AdapterTypeMismatch { reason: String },

    /// A store mutation addressed an index outside the current bounds.
    #[error("{operation} out of range: index {index}, len {len}")]
    OutOfRangeMutation {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    /// The timer ID is invalid or has already fired.
    #[error("Invalid or expired timer ID")]
    InvalidTimer,

    /// Invalid configuration value or malformed configuration document.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Failed to read a configuration file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DragListError {
    /// Create an out-of-range mutation error.
    pub fn out_of_range(operation: &'static str, index: usize, len: usize) -> Self {
        Self::OutOfRangeMutation {
            operation,
            index,
            len,
        }
    }

    /// Create an adapter mismatch error.
    pub fn adapter_mismatch(reason: impl Into<String>) -> Self {
        Self::AdapterTypeMismatch {
            reason: reason.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors that indicate a violated invariant rather
    /// than a recoverable condition.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::AdapterTypeMismatch { .. } | Self::OutOfRangeMutation { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = DragListError::out_of_range("remove", 7, 3);
        assert_eq!(err.to_string(), "remove out of range: index 7, len 3");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_position_is_recoverable() {
        let err = DragListError::InvalidPosition { x: 1.0, y: 2.0 };
        assert!(!err.is_fatal());
    }
}
