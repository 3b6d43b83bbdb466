//! A family tree

use serde::Serialize;

use crate::preferences::Preferences;

/// A genealogy dataset with its own preferences
#[derive(Debug)]
pub struct Tree {
    id: u32,
    name: String,
    title: String,
    preferences: Preferences,
}

/// Serializable description of a tree
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeSummary {
    pub id: u32,
    pub name: String,
    pub title: String,
}

impl Tree {
    pub fn new(id: u32, name: impl Into<String>, title: impl Into<String>, preferences: Preferences) -> Self {
        Self {
            id,
            name: name.into(),
            title: title.into(),
            preferences,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Short name used in URLs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title, falling back to the name
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }

    pub fn get_preference(&self, key: &str) -> Option<String> {
        self.preferences.get_preference(key)
    }

    pub fn set_preference(&self, key: &str, value: &str) {
        self.preferences.set_preference(key, value);
    }

    pub fn summary(&self) -> TreeSummary {
        TreeSummary {
            id: self.id,
            name: self.name.clone(),
            title: self.title().to_string(),
        }
    }
}
