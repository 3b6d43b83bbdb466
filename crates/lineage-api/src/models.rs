//! API request and response models

use lineage_trees::TreeSummary;
use serde::{Deserialize, Serialize};

/// An installed theme
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeInfo {
    /// Theme identifier
    pub name: String,
    /// Human readable title
    pub title: String,
}

/// Installed themes and the one applied to this request
#[derive(Debug, Clone, Serialize)]
pub struct ThemeListResponse {
    /// Identifier of the active theme
    pub active: String,
    /// Every selectable theme, by name
    pub themes: Vec<ThemeInfo>,
}

/// Hosted trees
#[derive(Debug, Clone, Serialize)]
pub struct TreeListResponse {
    /// Trees ordered by name
    pub trees: Vec<TreeSummary>,
    /// Total count
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Live sessions
    pub sessions: usize,
}
