//! Configuration error types
//!
//! The buffer and pool operations themselves have no recoverable-error
//! surface: precondition violations are debug assertions and allocation
//! failure aborts. Only loading and validating configuration can fail.

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating staging configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error - a field holds an unusable value
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Io {
            path: "staging.toml".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("staging.toml"));

        let err = ConfigError::InvalidValue {
            field: "initial_capacity",
            reason: "must be at least 1",
        };
        assert!(err.to_string().contains("initial_capacity"));
        assert!(err.to_string().contains("at least 1"));
    }
}
