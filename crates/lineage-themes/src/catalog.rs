//! Installed themes keyed by identifier

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::module::{Module, ThemeModule};

/// The set of installed theme modules, keyed by name.
///
/// Built from modules that expose the theme capability; modules without it
/// never appear here, whatever their name.
#[derive(Clone, Default)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, Arc<dyn ThemeModule>>,
}

impl ThemeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the theme-capable modules
    pub fn from_modules<'a, I>(modules: I) -> Self
    where
        I: IntoIterator<Item = &'a Arc<dyn Module>>,
    {
        let mut catalog = Self::new();
        for module in modules {
            if let Some(theme) = Arc::clone(module).as_theme() {
                catalog.insert(theme);
            }
        }
        catalog
    }

    /// Add a theme, replacing any theme of the same name
    pub fn insert(&mut self, theme: Arc<dyn ThemeModule>) {
        self.themes.insert(theme.name().to_string(), theme);
    }

    /// Theme with this identifier.
    ///
    /// The empty identifier never matches.
    pub fn get(&self, id: &str) -> Option<Arc<dyn ThemeModule>> {
        if id.is_empty() {
            return None;
        }
        self.themes.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        !id.is_empty() && self.themes.contains_key(id)
    }

    /// Theme names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ThemeModule>> {
        self.themes.values()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl std::fmt::Debug for ThemeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeCatalog")
            .field("themes", &self.names())
            .finish()
    }
}
