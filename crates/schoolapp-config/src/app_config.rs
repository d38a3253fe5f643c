//! Application configuration structures.

use schoolapp_core::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, test, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "schoolapp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (`sqlite://path/to/file.db` or `sqlite::memory:`).
    pub url: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds. Zero keeps idle connections forever.
    pub idle_timeout_secs: u64,
    /// Enable SQL statement logging.
    pub log_queries: bool,
    /// Apply pending migrations when the pool is created.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://schoolapp.db".to_string(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            log_queries: false,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Returns a configuration for a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            idle_timeout_secs: 0,
            ..Self::default()
        }
    }

    /// Returns true if the URL points at an in-memory database.
    ///
    /// Every connection to `sqlite::memory:` opens its own empty database,
    /// so callers must keep such a pool on a single long-lived connection.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration, or `None` if disabled.
    #[must_use]
    pub const fn idle_timeout(&self) -> Option<Duration> {
        if self.idle_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.idle_timeout_secs))
        }
    }
}
