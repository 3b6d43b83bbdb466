//! Registry of the trees hosted by this site

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::{Result, TreeError};
use crate::preferences::Preferences;
use crate::tree::{Tree, TreeSummary};

/// Trees indexed by name
#[derive(Debug, Default)]
pub struct TreeService {
    trees: RwLock<BTreeMap<String, Arc<Tree>>>,
}

impl TreeService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree. Names are URL components, so only letters, digits,
    /// `-` and `_` are accepted.
    pub fn create(&self, name: &str, title: &str, preferences: Preferences) -> Result<Arc<Tree>> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(TreeError::InvalidName(name.to_string()));
        }

        let mut trees = self.trees.write().unwrap_or_else(PoisonError::into_inner);
        if trees.contains_key(name) {
            return Err(TreeError::AlreadyExists(name.to_string()));
        }

        let id = trees.values().map(|t| t.id()).max().unwrap_or(0) + 1;
        let tree = Arc::new(Tree::new(id, name, title, preferences));
        trees.insert(name.to_string(), Arc::clone(&tree));

        info!("Created tree {} ({})", name, id);
        Ok(tree)
    }

    /// Find a tree by name
    pub fn find(&self, name: &str) -> Result<Arc<Tree>> {
        self.trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| TreeError::NotFound(name.to_string()))
    }

    /// All trees, ordered by name
    pub fn all(&self) -> Vec<TreeSummary> {
        self.trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|tree| tree.summary())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.trees
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
