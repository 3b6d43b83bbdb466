//! Modules that ship with Lineage

use std::sync::Arc;

use crate::module::{Module, Palette, ThemeModule};
use crate::registration::ModuleRegistration;

/// A theme compiled into the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTheme {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub stylesheets: &'static [&'static str],
    /// primary, background, foreground, accent
    pub colors: [&'static str; 4],
}

impl Module for BuiltinTheme {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn description(&self) -> &str {
        self.description
    }

    fn as_theme(self: Arc<Self>) -> Option<Arc<dyn ThemeModule>> {
        Some(self)
    }
}

impl ThemeModule for BuiltinTheme {
    fn stylesheets(&self) -> Vec<String> {
        self.stylesheets.iter().map(|s| s.to_string()).collect()
    }

    fn palette(&self) -> Palette {
        let [primary, background, foreground, accent] = self.colors;
        Palette::new(primary, background, foreground, accent)
    }
}

/// A compiled-in module without a theme capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinModule {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl Module for BuiltinModule {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn description(&self) -> &str {
        self.description
    }
}

pub const WEBTREES: BuiltinTheme = BuiltinTheme {
    name: "webtrees",
    title: "webtrees",
    description: "The default theme.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/webtrees.min.css"],
    colors: ["#1a5276", "#ffffff", "#222222", "#d35400"],
};

pub const CLOUDS: BuiltinTheme = BuiltinTheme {
    name: "clouds",
    title: "clouds",
    description: "Soft blues and greys.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/clouds.min.css"],
    colors: ["#3b6ea5", "#e6eef7", "#1d2b3a", "#f2a900"],
};

pub const COLORS: BuiltinTheme = BuiltinTheme {
    name: "colors",
    title: "colors",
    description: "A brightly coloured theme.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/colors.min.css"],
    colors: ["#8e44ad", "#fdfefe", "#17202a", "#27ae60"],
};

pub const FAB: BuiltinTheme = BuiltinTheme {
    name: "fab",
    title: "F.A.B.",
    description: "A compact theme with a light background.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/fab.min.css"],
    colors: ["#555555", "#f8f8f8", "#000000", "#cc0000"],
};

pub const MINIMAL: BuiltinTheme = BuiltinTheme {
    name: "minimal",
    title: "minimal",
    description: "A plain theme with few decorations.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/minimal.min.css"],
    colors: ["#000000", "#ffffff", "#000000", "#666666"],
};

pub const XENEA: BuiltinTheme = BuiltinTheme {
    name: "xenea",
    title: "xenea",
    description: "A theme with a blue header.",
    stylesheets: &["/public/css/vendor.min.css", "/public/css/xenea.min.css"],
    colors: ["#0073cf", "#ffffff", "#333333", "#81a9cb"],
};

pub const SITEMAP: BuiltinModule = BuiltinModule {
    name: "sitemap",
    title: "Sitemaps",
    description: "Generate sitemap files for search engines.",
};

pub const PRIVACY_POLICY: BuiltinModule = BuiltinModule {
    name: "privacy-policy",
    title: "Privacy policy",
    description: "A page describing how visitor data is used.",
};

/// Every compiled-in theme
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[WEBTREES, CLOUDS, COLORS, FAB, MINIMAL, XENEA];

/// The application's fallback theme.
///
/// Independent of module discovery and of the enabled/disabled state, so the
/// resolver always has a last resort.
pub fn default_theme() -> Arc<dyn ThemeModule> {
    Arc::new(WEBTREES)
}

fn webtrees() -> Arc<dyn Module> {
    Arc::new(WEBTREES)
}

fn clouds() -> Arc<dyn Module> {
    Arc::new(CLOUDS)
}

fn colors() -> Arc<dyn Module> {
    Arc::new(COLORS)
}

fn fab() -> Arc<dyn Module> {
    Arc::new(FAB)
}

fn minimal() -> Arc<dyn Module> {
    Arc::new(MINIMAL)
}

fn xenea() -> Arc<dyn Module> {
    Arc::new(XENEA)
}

fn sitemap() -> Arc<dyn Module> {
    Arc::new(SITEMAP)
}

fn privacy_policy() -> Arc<dyn Module> {
    Arc::new(PRIVACY_POLICY)
}

// The default theme registers first so it heads every listing.
inventory::submit! { ModuleRegistration::with_priority("webtrees", webtrees, 0) }
inventory::submit! { ModuleRegistration::new("clouds", clouds) }
inventory::submit! { ModuleRegistration::new("colors", colors) }
inventory::submit! { ModuleRegistration::new("fab", fab) }
inventory::submit! { ModuleRegistration::new("minimal", minimal) }
inventory::submit! { ModuleRegistration::new("xenea", xenea) }
inventory::submit! { ModuleRegistration::new("sitemap", sitemap) }
inventory::submit! { ModuleRegistration::new("privacy-policy", privacy_policy) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes_are_valid() {
        for theme in BUILTIN_THEMES {
            assert!(theme.palette().validate().is_ok(), "{}", theme.name);
        }
    }

    #[test]
    fn test_builtin_theme_capability() {
        let module: Arc<dyn Module> = Arc::new(CLOUDS);
        let theme = module.as_theme().expect("clouds is a theme");
        assert_eq!(theme.name(), "clouds");
        assert!(theme.stylesheets()[1].ends_with("clouds.min.css"));
    }

    #[test]
    fn test_plain_module_has_no_theme_capability() {
        let module: Arc<dyn Module> = Arc::new(SITEMAP);
        assert!(module.as_theme().is_none());
    }

    #[test]
    fn test_default_theme_renders_page() {
        let page = default_theme().render_page("Smith & Jones", "<p>Welcome</p>");

        assert!(page.contains("<title>Smith &amp; Jones</title>"));
        assert!(page.contains("<body class=\"theme-webtrees\">"));
        assert!(page.contains("/public/css/webtrees.min.css"));
        assert!(page.contains("--color-accent:#d35400"));
        assert!(page.contains("<p>Welcome</p>"));
    }
}
