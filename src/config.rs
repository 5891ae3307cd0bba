//! Staging configuration
//!
//! Sizing and decay policy for the staging buffer and format pool.
//! Every field has a default, so an empty TOML table is a valid config.
//!
//! # Example
//!
//! ```toml
//! initial_capacity = 256
//! format_pool_capacity = 16
//! decay_period = "30s"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::{DEFAULT_FORMAT_POOL_CAPACITY, DEFAULT_TRANSIT_BUFFER_CAPACITY};

/// Default decay period before an idle expanded buffer compacts
const DEFAULT_DECAY_PERIOD: Duration = Duration::from_secs(30);

/// Configuration for the staging buffer and format buffer pool
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Initial (and post-shrink) staging buffer capacity in event slots;
    /// rounded up to a power of two
    pub initial_capacity: usize,

    /// Initial format buffer pool capacity; rounded up to a power of two
    pub format_pool_capacity: usize,

    /// How long observed occupancy must stay low before an expanded
    /// staging buffer compacts; zero disables compaction
    #[serde(with = "humantime_serde")]
    pub decay_period: Duration,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_TRANSIT_BUFFER_CAPACITY,
            format_pool_capacity: DEFAULT_FORMAT_POOL_CAPACITY,
            decay_period: DEFAULT_DECAY_PERIOD,
        }
    }
}

impl StagingConfig {
    /// Load and validate a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "initial_capacity",
                reason: "must be at least 1",
            });
        }
        if self.format_pool_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "format_pool_capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
