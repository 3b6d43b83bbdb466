//! Configuration manager implementation

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigLoader},
};

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager reading `lineage.toml`
    pub fn new() -> Self {
        Self::with_path(PathBuf::from("lineage.toml"))
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: "LINEAGE".to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate in one step
    pub fn load_validated(&mut self) -> Result<AppConfig> {
        let config = self.load_config()?;
        self.validate_config(&config)?;
        Ok(config)
    }
}

impl ConfigLoader for ConfigManager {
    fn load_config(&mut self) -> Result<AppConfig> {
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder()
            .add_source(
                File::from(self.config_path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.server.port == 0 {
            return Err(ConfigError::Validation(
                "Server port must be greater than 0".to_string(),
            ));
        }
        if config.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Session cookie name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for tree in &config.trees {
            if tree.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Tree name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(tree.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate tree name: {}",
                    tree.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = ConfigManager::with_path(dir.path().join("absent.toml"))
            .with_env_prefix("LINEAGE_TEST_ABSENT");

        let config = manager.load_config().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lineage.toml");
        let mut manager =
            ConfigManager::with_path(path.clone()).with_env_prefix("LINEAGE_TEST_SAVE");

        let mut config = AppConfig::default();
        config.server.port = 9090;
        config.modules.disabled.push("xenea".to_string());
        manager.save_config(&config).unwrap();

        assert!(path.exists());
        let loaded = manager.load_config().unwrap();
        assert_eq!(loaded.server.port, 9090);
        assert_eq!(loaded.modules.disabled, vec!["xenea".to_string()]);
    }
}
