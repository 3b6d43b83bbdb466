//! Installed modules and their enabled state

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::ThemeCatalog;
use crate::error::{Result, ThemeError};
use crate::loader::{CustomTheme, ThemeLoader, ThemeManifest};
use crate::module::{Module, ThemeModule};
use crate::registration::discovered_modules;

/// All installed modules, compiled-in and custom
#[derive(Debug, Default)]
pub struct ModuleService {
    modules: Vec<Arc<dyn Module>>,
    disabled: HashSet<String>,
}

impl ModuleService {
    /// An empty service with no modules installed
    pub fn new() -> Self {
        Self::default()
    }

    /// A service holding every module discovered at link time
    pub fn discover() -> Self {
        Self {
            modules: discovered_modules(),
            disabled: HashSet::new(),
        }
    }

    /// Switch off the named modules
    pub fn with_disabled<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabled.extend(names.into_iter().map(Into::into));
        self
    }

    /// Install a module
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<()> {
        if self.modules.iter().any(|m| m.name() == module.name()) {
            return Err(ThemeError::AlreadyExists(module.name().to_string()));
        }
        self.modules.push(module);
        Ok(())
    }

    /// Install the custom themes described by the manifests in `dir`.
    ///
    /// A theme may extend any installed theme, including another custom theme
    /// from the same directory. Manifests whose parent never becomes available,
    /// or whose name is taken, are skipped with a warning. Returns the number
    /// of themes installed.
    pub fn load_custom_themes(&mut self, dir: &Path) -> Result<usize> {
        let pending = ThemeLoader::load_from_directory(dir)?;
        let installed = self.install_manifests(pending);
        info!("Loaded {} custom themes from {}", installed, dir.display());
        Ok(installed)
    }

    fn install_manifests(&mut self, mut pending: Vec<ThemeManifest>) -> usize {
        let mut installed = 0;

        loop {
            let before = pending.len();
            let mut waiting = Vec::new();

            for manifest in pending {
                let parent = match &manifest.parent {
                    None => None,
                    Some(parent) => match self.find_theme_any(parent) {
                        Some(theme) => Some(theme),
                        None => {
                            waiting.push(manifest);
                            continue;
                        }
                    },
                };

                let theme = CustomTheme::from_manifest(manifest, parent.as_deref());
                match self.register(Arc::new(theme)) {
                    Ok(()) => installed += 1,
                    Err(e) => warn!("Skipping custom theme: {}", e),
                }
            }

            pending = waiting;
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        for manifest in pending {
            let error = ThemeError::UnknownParent {
                theme: manifest.name,
                parent: manifest.parent.unwrap_or_default(),
            };
            warn!("Skipping custom theme: {}", error);
        }

        installed
    }

    // Parents may be disabled themselves; inheritance only needs their assets.
    fn find_theme_any(&self, name: &str) -> Option<Arc<dyn ThemeModule>> {
        self.modules
            .iter()
            .find(|m| m.name() == name)
            .and_then(|m| Arc::clone(m).as_theme())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.contains(name) && self.modules.iter().any(|m| m.name() == name)
    }

    /// Enabled modules, in installation order
    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.modules
            .iter()
            .filter(|m| !self.disabled.contains(m.name()))
    }

    /// An enabled module by name
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn Module>> {
        self.all().find(|m| m.name() == name).cloned()
    }

    /// Catalog of the enabled theme modules
    pub fn find_themes(&self) -> ThemeCatalog {
        ThemeCatalog::from_modules(self.all())
    }

    /// Number of installed modules, enabled or not
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{CLOUDS, SITEMAP, WEBTREES};

    fn manifest(name: &str, parent: Option<&str>) -> ThemeManifest {
        ThemeManifest {
            name: name.to_string(),
            title: name.to_string(),
            description: String::new(),
            parent: parent.map(str::to_string),
            stylesheets: vec![format!("/themes/{}.css", name)],
            palette: None,
        }
    }

    fn service() -> ModuleService {
        let mut service = ModuleService::new();
        service.register(Arc::new(WEBTREES)).unwrap();
        service.register(Arc::new(CLOUDS)).unwrap();
        service.register(Arc::new(SITEMAP)).unwrap();
        service
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut service = service();
        assert!(matches!(
            service.register(Arc::new(CLOUDS)),
            Err(ThemeError::AlreadyExists(name)) if name == "clouds"
        ));
    }

    #[test]
    fn test_disabled_modules_are_hidden() {
        let service = service().with_disabled(["clouds"]);

        assert!(!service.is_enabled("clouds"));
        assert!(service.find_by_name("clouds").is_none());
        assert_eq!(service.find_themes().names(), vec!["webtrees"]);
        assert_eq!(service.len(), 3);
    }

    #[test]
    fn test_catalog_excludes_plain_modules() {
        let service = service();
        assert!(service.find_by_name("sitemap").is_some());
        assert!(service.find_themes().get("sitemap").is_none());
    }

    #[test]
    fn test_parent_declared_after_child_is_resolved() {
        let mut service = service();
        let installed = service.install_manifests(vec![
            manifest("a-child", Some("z-parent")),
            manifest("z-parent", Some("clouds")),
        ]);

        assert_eq!(installed, 2);
        let child = service.find_themes().get("a-child").unwrap();
        assert_eq!(
            child.stylesheets(),
            vec![
                "/public/css/vendor.min.css".to_string(),
                "/public/css/clouds.min.css".to_string(),
                "/themes/z-parent.css".to_string(),
                "/themes/a-child.css".to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_parent_and_name_clash_are_skipped() {
        let mut service = service();
        let installed = service.install_manifests(vec![
            manifest("orphan", Some("missing")),
            manifest("clouds", None),
            manifest("fresh", None),
        ]);

        assert_eq!(installed, 1);
        assert!(service.is_enabled("fresh"));
        assert!(!service.is_enabled("orphan"));
    }

    #[test]
    fn test_plain_module_cannot_be_a_parent() {
        let mut service = service();
        assert_eq!(service.install_manifests(vec![manifest("child", Some("sitemap"))]), 0);
    }
}
