#![warn(missing_docs)]

//! Lineage HTTP server
//!
//! Serves genealogy pages through the theme chosen for each request. Every
//! request passes through the session, request-scope and `use_theme`
//! middleware before reaching its handler, so handlers find the active theme
//! in the request scope.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use server::ApiServer;
pub use state::AppState;
