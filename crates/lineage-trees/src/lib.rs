//! Family trees and preferences
//!
//! A site hosts any number of [`Tree`]s. Both the site and each tree carry a
//! string preference store; well-known keys live in [`preferences`].

pub mod context;
pub mod error;
pub mod preferences;
pub mod service;
pub mod tree;

pub use context::{RequestedTree, TreeContext};
pub use error::{Result, TreeError};
pub use preferences::{Preferences, SitePreferences, THEME_DIR};
pub use service::TreeService;
pub use tree::{Tree, TreeSummary};
