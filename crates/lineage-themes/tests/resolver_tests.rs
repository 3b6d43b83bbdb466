//! Theme resolution against stand-in sessions and tree contexts

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lineage_di::DIContainer;
use lineage_sessions::{Session, SessionStore};
use lineage_themes::{
    default_theme, ActiveTheme, BuiltinModule, BuiltinTheme, Module, ThemeCatalog, ThemeResolver,
    ThemeSource, SESSION_THEME_KEY,
};
use lineage_trees::{Preferences, SitePreferences, Tree, TreeContext, TreeError, THEME_DIR};
use proptest::prelude::*;

/// Counts how often the current tree is asked for
struct CountingTrees {
    tree: Option<Arc<Tree>>,
    calls: Cell<usize>,
}

impl CountingTrees {
    fn new(tree: Option<Arc<Tree>>) -> Self {
        Self {
            tree,
            calls: Cell::new(0),
        }
    }
}

impl TreeContext for CountingTrees {
    type Error = TreeError;

    fn current_tree(&self) -> Result<Option<Arc<Tree>>, TreeError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.tree.clone())
    }
}

/// A tree context whose lookup always fails
struct BrokenTrees;

impl TreeContext for BrokenTrees {
    type Error = TreeError;

    fn current_tree(&self) -> Result<Option<Arc<Tree>>, TreeError> {
        Err(TreeError::NotFound("broken".to_string()))
    }
}

/// Minimal in-memory session
#[derive(Default)]
struct MapSession(Mutex<HashMap<String, String>>);

impl SessionStore for MapSession {
    fn get(&self, key: &str, default: &str) -> String {
        self.0
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put(&self, key: &str, value: &str) {
        self.0.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    fn forget(&self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }

    fn has(&self, key: &str) -> bool {
        self.0.lock().unwrap().contains_key(key)
    }
}

fn theme(name: &'static str) -> Arc<dyn Module> {
    Arc::new(BuiltinTheme {
        name,
        title: name,
        description: "",
        stylesheets: &[],
        colors: ["#000000", "#ffffff", "#000000", "#ffffff"],
    })
}

fn resolver() -> ThemeResolver {
    let modules = vec![
        theme("foo"),
        theme("dark"),
        Arc::new(BuiltinModule {
            name: "plain",
            title: "Plain",
            description: "",
        }) as Arc<dyn Module>,
    ];
    ThemeResolver::new(ThemeCatalog::from_modules(&modules), default_theme())
}

fn tree(theme: &str) -> Arc<Tree> {
    let preferences: Preferences = [(THEME_DIR, theme)].into_iter().collect();
    Arc::new(Tree::new(1, "demo", "Demo", preferences))
}

#[test]
fn test_session_theme_is_kept() {
    let session = MapSession::default();
    session.put(SESSION_THEME_KEY, "foo");
    let scope = DIContainer::new();

    let resolution = resolver()
        .resolve(&session, &None::<Arc<Tree>>, &SitePreferences::default(), &scope)
        .unwrap();

    assert_eq!(resolution.theme.name(), "foo");
    assert_eq!(scope.resolve::<ActiveTheme>().unwrap().name(), "foo");
    assert_eq!(session.get(SESSION_THEME_KEY, ""), "foo");
}

#[test]
fn test_tree_theme_is_remembered() {
    let session = MapSession::default();
    session.put(SESSION_THEME_KEY, "");
    let scope = DIContainer::new();

    let resolution = resolver()
        .resolve(&session, &Some(tree("dark")), &SitePreferences::default(), &scope)
        .unwrap();

    assert_eq!(resolution.theme.name(), "dark");
    assert_eq!(resolution.source, ThemeSource::Tree);
    assert_eq!(session.get(SESSION_THEME_KEY, ""), "dark");
}

#[test]
fn test_unknown_site_theme_falls_back_to_default() {
    let session = MapSession::default();
    let site = SitePreferences::default();
    site.set_preference(THEME_DIR, "classic");
    let scope = DIContainer::new();

    let resolution = resolver()
        .resolve(&session, &None::<Arc<Tree>>, &site, &scope)
        .unwrap();

    assert_eq!(resolution.source, ThemeSource::Default);
    assert_eq!(resolution.theme.name(), "webtrees");
    assert_eq!(scope.resolve::<ActiveTheme>().unwrap().name(), "webtrees");
    assert_eq!(session.get(SESSION_THEME_KEY, ""), "webtrees");
}

#[test]
fn test_tree_is_not_resolved_when_session_matches() {
    let session = Session::new();
    session.put(SESSION_THEME_KEY, "foo");
    let trees = CountingTrees::new(Some(tree("dark")));

    resolver()
        .select(&session, &trees, &SitePreferences::default())
        .unwrap();

    assert_eq!(trees.calls.get(), 0);
}

#[test]
fn test_tree_is_resolved_once_when_session_misses() {
    let session = Session::new();
    session.put(SESSION_THEME_KEY, "removed-theme");
    let trees = CountingTrees::new(Some(tree("dark")));

    let resolution = resolver()
        .select(&session, &trees, &SitePreferences::default())
        .unwrap();

    assert_eq!(resolution.theme.name(), "dark");
    assert_eq!(trees.calls.get(), 1);
}

#[test]
fn test_non_theme_entries_are_skipped_at_every_level() {
    let session = Session::new();
    session.put(SESSION_THEME_KEY, "plain");
    let site = SitePreferences::default();
    site.set_preference(THEME_DIR, "plain");

    let resolution = resolver()
        .select(&session, &Some(tree("plain")), &site)
        .unwrap();

    assert_eq!(resolution.source, ThemeSource::Default);
}

#[test]
fn test_tree_errors_propagate_unchanged() {
    let session = Session::new();
    let scope = DIContainer::new();
    let mut called = false;

    let result = resolver().handle(
        &session,
        &BrokenTrees,
        &SitePreferences::default(),
        &scope,
        (),
        |_| called = true,
    );

    assert!(matches!(result, Err(TreeError::NotFound(name)) if name == "broken"));
    assert!(!called);
    assert!(!scope.is_registered::<ActiveTheme>());
    assert!(!session.has(SESSION_THEME_KEY));
}

#[test]
fn test_tree_errors_are_not_reached_when_session_matches() {
    let session = Session::new();
    session.put(SESSION_THEME_KEY, "dark");

    let resolution = resolver()
        .select(&session, &BrokenTrees, &SitePreferences::default())
        .unwrap();

    assert_eq!(resolution.theme.name(), "dark");
}

#[test]
fn test_scope_binding_shadows_parent() {
    let root = Arc::new(DIContainer::new());
    root.instance(Arc::new(ActiveTheme::new(default_theme())));
    let scope = root.create_scope();
    let session = Session::new();
    session.put(SESSION_THEME_KEY, "foo");

    resolver()
        .resolve(&session, &None::<Arc<Tree>>, &SitePreferences::default(), &scope)
        .unwrap();

    assert_eq!(scope.resolve::<ActiveTheme>().unwrap().name(), "foo");
    assert_eq!(root.resolve::<ActiveTheme>().unwrap().name(), "webtrees");
}

fn candidate() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec!["", "foo", "dark", "plain", "classic"]))
}

fn expected(session: Option<&str>, tree: Option<&str>, site: Option<&str>) -> &'static str {
    for id in [session, tree, site].into_iter().flatten() {
        match id {
            "foo" => return "foo",
            "dark" => return "dark",
            _ => {}
        }
    }
    "webtrees"
}

proptest! {
    #[test]
    fn test_first_installed_candidate_wins(
        session_id in candidate(),
        tree_id in candidate(),
        site_id in candidate(),
    ) {
        let session = Session::new();
        if let Some(id) = session_id {
            session.put(SESSION_THEME_KEY, id);
        }
        let trees = tree_id.map(tree);
        let site = SitePreferences::default();
        if let Some(id) = site_id {
            site.set_preference(THEME_DIR, id);
        }

        let resolution = resolver().select(&session, &trees, &site).unwrap();
        prop_assert_eq!(resolution.theme.name(), expected(session_id, tree_id, site_id));
    }

    #[test]
    fn test_resolution_is_idempotent(
        session_id in candidate(),
        tree_id in candidate(),
        site_id in candidate(),
    ) {
        let resolver = resolver();
        let session = Session::new();
        if let Some(id) = session_id {
            session.put(SESSION_THEME_KEY, id);
        }
        let trees = tree_id.map(tree);
        let site = SitePreferences::default();
        if let Some(id) = site_id {
            site.set_preference(THEME_DIR, id);
        }

        let first = resolver
            .resolve(&session, &trees, &site, &DIContainer::new())
            .unwrap();
        prop_assert_eq!(session.get(SESSION_THEME_KEY, ""), first.theme.name());

        let second = resolver
            .resolve(&session, &trees, &site, &DIContainer::new())
            .unwrap();
        prop_assert_eq!(second.theme.name(), first.theme.name());
    }

    #[test]
    fn test_continuation_runs_once(value in any::<u32>()) {
        let calls = Cell::new(0);
        let result = resolver().handle(
            &Session::new(),
            &None::<Arc<Tree>>,
            &SitePreferences::default(),
            &DIContainer::new(),
            value,
            |request| {
                calls.set(calls.get() + 1);
                request
            },
        );

        prop_assert_eq!(result.unwrap(), value);
        prop_assert_eq!(calls.get(), 1);
    }
}
