//! Error types for the themes module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme not found: {0}")]
    NotFound(String),

    #[error("Invalid theme format: {0}")]
    InvalidFormat(String),

    #[error("Theme validation failed: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Module already exists: {0}")]
    AlreadyExists(String),

    #[error("Theme {theme} extends unknown theme {parent}")]
    UnknownParent { theme: String, parent: String },
}

pub type Result<T> = std::result::Result<T, ThemeError>;
