//! Lineage Configuration Management
//!
//! Layered configuration for the Lineage server: built-in defaults, an
//! optional TOML file, then `LINEAGE__SECTION__KEY` environment overrides.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{
    AppConfig, ConfigLoader, ModulesConfig, ServerConfig, SessionConfig, SiteConfig, TreeConfig,
};
