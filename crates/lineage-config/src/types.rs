//! Core configuration types and data structures

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Session cookie configuration
    pub session: SessionConfig,
    /// Site-wide preferences
    pub site: SiteConfig,
    /// Family trees served by this site
    pub trees: Vec<TreeConfig>,
    /// Installed module configuration
    pub modules: ModulesConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id
    pub cookie_name: String,
    /// Idle time after which a session is discarded
    pub lifetime_secs: u64,
}

/// Site-wide preferences, e.g. `THEME_DIR`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub preferences: HashMap<String, String>,
}

/// A family tree and its preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeConfig {
    /// Short name used in URLs (`?tree=<name>`)
    pub name: String,
    /// Human readable title
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preferences: HashMap<String, String>,
}

/// Installed module configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ModulesConfig {
    /// Module names that are installed but switched off
    pub disabled: Vec<String>,
    /// Directory of custom theme manifests
    pub themes_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "lineage_session".to_string(),
            lifetime_secs: 7200,
        }
    }
}

/// Loads, saves and validates an [`AppConfig`]
pub trait ConfigLoader {
    /// Load configuration
    fn load_config(&mut self) -> Result<AppConfig, crate::error::ConfigError>;
    /// Save configuration
    fn save_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
}
