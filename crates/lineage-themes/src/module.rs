//! Module and theme capability traits

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An installed module
pub trait Module: Send + Sync + fmt::Debug {
    /// Unique identifier, e.g. `"clouds"`
    fn name(&self) -> &str;

    /// Human readable title
    fn title(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// The theme capability of this module, if it has one
    fn as_theme(self: Arc<Self>) -> Option<Arc<dyn ThemeModule>> {
        None
    }
}

/// A module that supplies the look of the site
pub trait ThemeModule: Module {
    /// Stylesheet URLs, in load order
    fn stylesheets(&self) -> Vec<String>;

    fn palette(&self) -> Palette;

    /// Wrap `body` (trusted HTML) in a complete page
    fn render_page(&self, title: &str, body: &str) -> String {
        let links: String = self
            .stylesheets()
            .iter()
            .map(|href| format!("<link rel=\"stylesheet\" href=\"{}\">", escape_html(href)))
            .collect();

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{links}\n<style>{vars}</style>\n</head>\n<body class=\"theme-{name}\">\n{body}\n</body>\n</html>\n",
            title = escape_html(title),
            links = links,
            vars = self.palette().css_variables(),
            name = escape_html(self.name()),
            body = body,
        )
    }
}

/// Theme colours, as `#rrggbb` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub background: String,
    pub foreground: String,
    pub accent: String,
}

impl Palette {
    pub fn new(primary: &str, background: &str, foreground: &str, accent: &str) -> Self {
        Self {
            primary: primary.to_string(),
            background: background.to_string(),
            foreground: foreground.to_string(),
            accent: accent.to_string(),
        }
    }

    /// Check that every colour is `#rrggbb`
    pub fn validate(&self) -> Result<(), String> {
        let colors = [
            ("primary", &self.primary),
            ("background", &self.background),
            ("foreground", &self.foreground),
            ("accent", &self.accent),
        ];

        for (name, color) in colors {
            let valid = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(format!("Invalid {} color: {}", name, color));
            }
        }
        Ok(())
    }

    pub fn css_variables(&self) -> String {
        format!(
            ":root{{--color-primary:{};--color-background:{};--color-foreground:{};--color-accent:{};}}",
            self.primary, self.background, self.foreground, self.accent
        )
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new("#1a5276", "#ffffff", "#222222", "#d35400")
    }
}

/// The theme chosen for the current request.
///
/// Bound into the request scope by the theme middleware; handlers resolve it
/// from the scope instead of re-running theme selection.
#[derive(Debug, Clone)]
pub struct ActiveTheme(Arc<dyn ThemeModule>);

impl ActiveTheme {
    pub fn new(theme: Arc<dyn ThemeModule>) -> Self {
        Self(theme)
    }

    pub fn theme(&self) -> &Arc<dyn ThemeModule> {
        &self.0
    }
}

impl Deref for ActiveTheme {
    type Target = dyn ThemeModule;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
