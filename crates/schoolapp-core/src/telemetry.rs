//! Tracing subscriber setup.
//!
//! Libraries in this workspace only emit `tracing` events; the process that
//! hosts them decides where the events go by calling [`init_tracing`] once.

use crate::{SchoolError, SchoolResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Whether to install a subscriber at startup.
    pub enabled: bool,

    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,

    /// Include the event target (module path) in each line.
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info,schoolapp=debug".to_string(),
            json: false,
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    /// Builds the env filter, preferring `RUST_LOG` over the configured level.
    pub fn env_filter(&self) -> SchoolResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| {
            SchoolError::Configuration(format!("Invalid log level '{}': {}", self.level, e))
        })
    }
}

/// Installs the global tracing subscriber.
///
/// Fails with `Configuration` if the level directive is malformed or a
/// global subscriber has already been installed.
pub fn init_tracing(config: &TelemetryConfig) -> SchoolResult<()> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| {
        SchoolError::Configuration(format!("Failed to install tracing subscriber: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert!(config.enabled);
        assert!(!config.json);
        assert_eq!(config.level, "info,schoolapp=debug");
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            level: "info,schoolapp=notalevel".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(config.env_filter(), Err(SchoolError::Configuration(_))));
    }

    #[test]
    fn test_second_init_fails() {
        let config = TelemetryConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(init_tracing(&config), Err(SchoolError::Configuration(_))));
    }
}
