//! Configuration loader with layered sources.

use crate::validation::{format_validation_errors, ConfigValidator};
use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use schoolapp_core::SchoolError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable selecting the environment-specific config file.
pub const ENVIRONMENT_VAR: &str = "SCHOOLAPP_ENVIRONMENT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local overrides
    /// 4. Environment variables with `SCHOOLAPP_` prefix
    ///
    /// The environment name comes from `SCHOOLAPP_ENVIRONMENT` and defaults
    /// to `development`.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, SchoolError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicitly named environment.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, SchoolError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            environment,
        })
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Returns the environment this loader was created for.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Reloads the configuration from disk.
    ///
    /// The current configuration is left untouched if the new one fails to
    /// load or validate.
    pub async fn reload(&self) -> Result<(), SchoolError> {
        let new_config = Self::load_config(&self.config_dir, &self.environment)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, SchoolError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("SCHOOLAPP")
                .separator("__")
                .try_parsing(true),
        );

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_school_error)?;

        if app_config.app.environment.is_empty() || app_config.app.environment == "development" {
            app_config.app.environment = environment.to_string();
        }

        ConfigValidator::validate(&app_config)
            .map_err(|errors| SchoolError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

fn config_error_to_school_error(err: ConfigError) -> SchoolError {
    SchoolError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn dir_str(dir: &TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_empty_dir_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        let config = loader.get().await;

        assert_eq!(config.app.name, "schoolapp");
        assert_eq!(config.app.environment, "test");
        assert_eq!(config.database.max_connections, 10);
    }

    #[tokio::test]
    async fn test_layered_files_override_in_order() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[database]\nurl = \"sqlite://default.db\"\nmax_connections = 4\n",
        );
        write(&dir, "staging.toml", "[database]\nurl = \"sqlite://staging.db\"\n");
        write(&dir, "local.toml", "[telemetry]\njson = true\n");

        let loader = ConfigLoader::with_environment(dir_str(&dir), "staging").unwrap();
        let config = loader.get().await;

        assert_eq!(config.database.url, "sqlite://staging.db");
        assert_eq!(config.database.max_connections, 4);
        assert!(config.telemetry.json);
        assert_eq!(loader.environment(), "staging");
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            "[database]\nmin_connections = 8\nmax_connections = 2\n",
        );

        let result = ConfigLoader::with_environment(dir_str(&dir), "test");
        match result {
            Err(SchoolError::Configuration(message)) => {
                assert!(message.contains("Invalid pool size"));
            }
            Err(other) => panic!("expected configuration error, got {other:?}"),
            Ok(_) => panic!("expected configuration error"),
        }
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[database]\nmax_connections = 3\n");

        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        assert_eq!(loader.get().await.database.max_connections, 3);

        write(&dir, "default.toml", "[database]\nmax_connections = 7\n");
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.database.max_connections, 7);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_config() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[database]\nmax_connections = 3\n");

        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        write(&dir, "default.toml", "[database]\nurl = \"\"\n");

        assert!(loader.reload().await.is_err());
        assert_eq!(loader.get().await.database.max_connections, 3);
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[database]\nurl = \"sqlite::memory:\"\n");

        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        let url: Option<String> = loader.get_value("database.url").await;
        assert_eq!(url.as_deref(), Some("sqlite::memory:"));

        let missing: Option<String> = loader.get_value("database.nope").await;
        assert!(missing.is_none());
    }
}
