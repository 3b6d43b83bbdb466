//! Lineage Sessions Module
//!
//! Each visitor gets a [`Session`]: a small string key/value store identified
//! by a random id carried in a cookie. The [`SessionManager`] owns every live
//! session and discards the ones left idle past their lifetime.

pub mod error;
pub mod manager;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use manager::SessionManager;
pub use session::{Session, SessionStore};
