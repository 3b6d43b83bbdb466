//! String preference stores for the site and for each tree

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Theme identifier preference, at site or tree scope
pub const THEME_DIR: &str = "THEME_DIR";

/// A preference store.
///
/// Keys are case-insensitive and stored upper-case, matching the convention
/// used for preference names such as [`THEME_DIR`].
#[derive(Debug, Default)]
pub struct Preferences {
    values: RwLock<HashMap<String, String>>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a preference, if set
    pub fn get_preference(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key.to_ascii_uppercase())
            .cloned()
    }

    /// Set a preference; an empty value removes it
    pub fn set_preference(&self, key: &str, value: &str) {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        if value.is_empty() {
            values.remove(&key.to_ascii_uppercase());
        } else {
            values.insert(key.to_ascii_uppercase(), value.to_string());
        }
    }

    /// Number of preferences set
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for Preferences
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let preferences = Preferences::new();
        for (key, value) in iter {
            preferences.set_preference(key.as_ref(), value.as_ref());
        }
        preferences
    }
}

/// Site-wide preferences
#[derive(Debug, Default)]
pub struct SitePreferences(Preferences);

impl SitePreferences {
    pub fn new(preferences: Preferences) -> Self {
        Self(preferences)
    }

    pub fn get_preference(&self, key: &str) -> Option<String> {
        self.0.get_preference(key)
    }

    pub fn set_preference(&self, key: &str, value: &str) {
        self.0.set_preference(key, value);
    }
}
