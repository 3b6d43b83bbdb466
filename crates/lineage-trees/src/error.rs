//! Error types for the trees module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Tree not found: {0}")]
    NotFound(String),

    #[error("Tree already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid tree name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;
