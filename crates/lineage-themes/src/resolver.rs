//! Per-request theme selection

use std::sync::Arc;

use lineage_di::DIContainer;
use lineage_sessions::SessionStore;
use lineage_trees::{SitePreferences, TreeContext, THEME_DIR};
use serde::Serialize;
use tracing::debug;

use crate::catalog::ThemeCatalog;
use crate::module::{ActiveTheme, ThemeModule};

/// Session key holding the visitor's theme
pub const SESSION_THEME_KEY: &str = "theme_id";

/// Where the selected theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Session,
    Tree,
    Site,
    Default,
}

/// The outcome of theme selection
#[derive(Debug, Clone)]
pub struct Resolution {
    pub theme: Arc<dyn ThemeModule>,
    pub source: ThemeSource,
}

type Lookup<E> = Result<Option<Arc<dyn ThemeModule>>, E>;

/// Picks the theme for a request.
///
/// Candidates are tried in order: the session's `theme_id`, the current tree's
/// `THEME_DIR`, the site's `THEME_DIR`, then the default theme. Each candidate
/// is only computed if every earlier one missed, so the current tree is never
/// resolved when the session already names an installed theme.
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    catalog: ThemeCatalog,
    default_theme: Arc<dyn ThemeModule>,
}

impl ThemeResolver {
    pub fn new(catalog: ThemeCatalog, default_theme: Arc<dyn ThemeModule>) -> Self {
        Self {
            catalog,
            default_theme,
        }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn default_theme(&self) -> &Arc<dyn ThemeModule> {
        &self.default_theme
    }

    /// Choose a theme without side effects.
    ///
    /// Only a failure to resolve the current tree is an error; it is returned
    /// as is.
    pub fn select<S, C>(
        &self,
        session: &S,
        trees: &C,
        site: &SitePreferences,
    ) -> Result<Resolution, C::Error>
    where
        S: SessionStore + ?Sized,
        C: TreeContext + ?Sized,
    {
        let from_session = || -> Lookup<C::Error> {
            Ok(self.catalog.get(&session.get(SESSION_THEME_KEY, "")))
        };
        let from_tree = || -> Lookup<C::Error> {
            Ok(trees
                .current_tree()?
                .and_then(|tree| tree.get_preference(THEME_DIR))
                .and_then(|id| self.catalog.get(&id)))
        };
        let from_site = || -> Lookup<C::Error> {
            Ok(site
                .get_preference(THEME_DIR)
                .and_then(|id| self.catalog.get(&id)))
        };

        let candidates: [(ThemeSource, &dyn Fn() -> Lookup<C::Error>); 3] = [
            (ThemeSource::Session, &from_session),
            (ThemeSource::Tree, &from_tree),
            (ThemeSource::Site, &from_site),
        ];

        for (source, candidate) in candidates {
            if let Some(theme) = candidate()? {
                debug!("Selected theme {} from {:?}", theme.name(), source);
                return Ok(Resolution { theme, source });
            }
        }

        debug!("Selected default theme {}", self.default_theme.name());
        Ok(Resolution {
            theme: Arc::clone(&self.default_theme),
            source: ThemeSource::Default,
        })
    }

    /// Choose a theme, bind it into `scope` as [`ActiveTheme`] and remember it
    /// in the session.
    pub fn resolve<S, C>(
        &self,
        session: &S,
        trees: &C,
        site: &SitePreferences,
        scope: &DIContainer,
    ) -> Result<Resolution, C::Error>
    where
        S: SessionStore + ?Sized,
        C: TreeContext + ?Sized,
    {
        let resolution = self.select(session, trees, site)?;

        scope.instance(Arc::new(ActiveTheme::new(Arc::clone(&resolution.theme))));
        session.put(SESSION_THEME_KEY, resolution.theme.name());

        Ok(resolution)
    }

    /// Resolve the theme, then hand `request` to `next` and return its result
    /// untouched.
    pub fn handle<S, C, R, T, F>(
        &self,
        session: &S,
        trees: &C,
        site: &SitePreferences,
        scope: &DIContainer,
        request: R,
        next: F,
    ) -> Result<T, C::Error>
    where
        S: SessionStore + ?Sized,
        C: TreeContext + ?Sized,
        F: FnOnce(R) -> T,
    {
        self.resolve(session, trees, site, scope)?;
        Ok(next(request))
    }
}
