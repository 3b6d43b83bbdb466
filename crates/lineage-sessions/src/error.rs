//! Error types for session management

use thiserror::Error;

/// Errors that can occur while working with sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// Session not found
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Session id is not well formed
    #[error("Invalid session id: {0}")]
    InvalidId(String),

    /// Session expired
    #[error("Session expired: {0}")]
    Expired(String),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
