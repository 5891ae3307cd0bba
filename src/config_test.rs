//! Tests for staging configuration

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::config::StagingConfig;
use crate::error::ConfigError;

#[test]
fn test_defaults() {
    let config = StagingConfig::default();
    assert_eq!(config.initial_capacity, 128);
    assert_eq!(config.format_pool_capacity, 8);
    assert_eq!(config.decay_period, Duration::from_secs(30));
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config: StagingConfig = toml::from_str("").unwrap();
    assert_eq!(config.initial_capacity, 128);
    assert_eq!(config.decay_period, Duration::from_secs(30));
}

#[test]
fn test_parse_full_config() {
    let config: StagingConfig = toml::from_str(
        r#"
        initial_capacity = 256
        format_pool_capacity = 16
        decay_period = "5s"
        "#,
    )
    .unwrap();

    assert_eq!(config.initial_capacity, 256);
    assert_eq!(config.format_pool_capacity, 16);
    assert_eq!(config.decay_period, Duration::from_secs(5));
}

#[test]
fn test_zero_decay_period_is_valid() {
    // Zero disables compaction; it is a policy choice, not an error
    let config: StagingConfig = toml::from_str(r#"decay_period = "0s""#).unwrap();
    assert!(config.validate().is_ok());
    assert!(config.decay_period.is_zero());
}

#[test]
fn test_validate_rejects_zero_capacities() {
    let config: StagingConfig = toml::from_str("initial_capacity = 0").unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "initial_capacity",
            ..
        })
    ));

    let config: StagingConfig = toml::from_str("format_pool_capacity = 0").unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue {
            field: "format_pool_capacity",
            ..
        })
    ));
}

#[test]
fn test_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "initial_capacity = 64").unwrap();
    writeln!(file, r#"decay_period = "2m""#).unwrap();

    let config = StagingConfig::from_toml_file(file.path()).unwrap();
    assert_eq!(config.initial_capacity, 64);
    assert_eq!(config.decay_period, Duration::from_secs(120));
}

#[test]
fn test_from_toml_file_missing_path() {
    let err = StagingConfig::from_toml_file("/nonexistent/staging.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/staging.toml"));
}

#[test]
fn test_from_toml_file_rejects_invalid_values() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "initial_capacity = 0").unwrap();

    let err = StagingConfig::from_toml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
