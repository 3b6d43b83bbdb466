//! Application state for the HTTP server

use std::sync::Arc;
use std::time::Instant;

use chrono::Duration;
use lineage_config::{AppConfig, ConfigError};
use lineage_di::{DIContainer, DIContainerBuilder};
use lineage_sessions::SessionManager;
use lineage_themes::{default_theme, ModuleService, ThemeResolver};
use lineage_trees::{Preferences, SitePreferences, TreeService};
use tracing::info;

use crate::error::ApiResult;

/// Application state shared across all handlers and middleware
#[derive(Clone)]
pub struct AppState {
    /// Root service container; each request gets a child scope of it
    pub container: Arc<DIContainer>,
    /// Live visitor sessions
    pub sessions: Arc<SessionManager>,
    /// Hosted family trees
    pub trees: Arc<TreeService>,
    /// Site-wide preferences
    pub site: Arc<SitePreferences>,
    /// Installed modules
    pub modules: Arc<ModuleService>,
    /// Per-request theme selection
    pub resolver: Arc<ThemeResolver>,
    /// Effective configuration
    pub config: Arc<AppConfig>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Pull the application services out of a populated container
    pub fn new(container: DIContainer, config: AppConfig) -> ApiResult<Self> {
        let sessions = container.resolve::<SessionManager>()?;
        let trees = container.resolve::<TreeService>()?;
        let site = container.resolve::<SitePreferences>()?;
        let modules = container.resolve::<ModuleService>()?;
        let resolver = container.resolve::<ThemeResolver>()?;

        Ok(Self {
            container: Arc::new(container),
            sessions,
            trees,
            site,
            modules,
            resolver,
            config: Arc::new(config),
            start_time: Instant::now(),
        })
    }

    /// Build every service described by `config` and wire them together
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        let lifetime = i64::try_from(config.session.lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| {
                ConfigError::Validation(format!(
                    "Session lifetime out of range: {}",
                    config.session.lifetime_secs
                ))
            })?;
        let sessions = SessionManager::new(lifetime);

        let site = SitePreferences::new(config.site.preferences.iter().collect());

        let trees = TreeService::new();
        for tree in &config.trees {
            let preferences: Preferences = tree.preferences.iter().collect();
            trees.create(&tree.name, &tree.title, preferences)?;
        }

        let mut modules =
            ModuleService::discover().with_disabled(config.modules.disabled.iter().cloned());
        if let Some(dir) = &config.modules.themes_dir {
            modules.load_custom_themes(dir)?;
        }

        let resolver = ThemeResolver::new(modules.find_themes(), default_theme());
        info!(
            "Serving {} trees with {} themes (default: {})",
            trees.count(),
            resolver.catalog().len(),
            resolver.default_theme().name()
        );

        let container = DIContainerBuilder::new()
            .instance(Arc::new(sessions))
            .instance(Arc::new(site))
            .instance(Arc::new(trees))
            .instance(Arc::new(modules))
            .instance(Arc::new(resolver))
            .build();

        Self::new(container, config)
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use lineage_config::TreeConfig;
    use lineage_trees::THEME_DIR;
    use std::collections::HashMap;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config
            .site
            .preferences
            .insert("theme_dir".to_string(), "clouds".to_string());
        config.trees.push(TreeConfig {
            name: "royals".to_string(),
            title: "Royal family".to_string(),
            preferences: HashMap::from([("theme_dir".to_string(), "xenea".to_string())]),
        });
        config.modules.disabled.push("fab".to_string());
        config
    }

    #[test]
    fn test_state_from_config() {
        let state = AppState::from_config(config()).unwrap();

        assert_eq!(state.site.get_preference(THEME_DIR).as_deref(), Some("clouds"));
        let tree = state.trees.find("royals").unwrap();
        assert_eq!(tree.get_preference(THEME_DIR).as_deref(), Some("xenea"));

        assert!(state.resolver.catalog().contains("clouds"));
        assert!(!state.resolver.catalog().contains("fab"));
        assert!(!state.modules.is_enabled("fab"));
    }

    #[test]
    fn test_services_are_shared_with_container() {
        let state = AppState::from_config(config()).unwrap();
        let trees = state.container.resolve::<TreeService>().unwrap();
        assert!(Arc::ptr_eq(&trees, &state.trees));
    }

    #[test]
    fn test_duplicate_tree_is_rejected() {
        let mut config = config();
        let duplicate = config.trees[0].clone();
        config.trees.push(duplicate);

        assert!(matches!(
            AppState::from_config(config),
            Err(ApiError::Tree(lineage_trees::TreeError::AlreadyExists(_)))
        ));
    }
}
