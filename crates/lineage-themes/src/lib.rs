//! Lineage Theme Management
//!
//! Themes are modules. Every installed [`Module`] may expose the theme
//! capability through [`Module::as_theme`]; the [`ModuleService`] collects the
//! enabled ones into a [`ThemeCatalog`], and the [`ThemeResolver`] picks the
//! theme for each request:
//!
//! 1. the theme remembered in the visitor's session (`theme_id`),
//! 2. the current tree's `THEME_DIR` preference,
//! 3. the site's `THEME_DIR` preference,
//! 4. the built-in default theme.
//!
//! The chosen theme is bound into the request scope as an [`ActiveTheme`] and
//! written back to the session.

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod module;
pub mod registration;
pub mod resolver;
pub mod service;

pub use builtin::{default_theme, BuiltinModule, BuiltinTheme};
pub use catalog::ThemeCatalog;
pub use error::{Result, ThemeError};
pub use loader::{CustomTheme, ThemeLoader, ThemeManifest};
pub use module::{escape_html, ActiveTheme, Module, Palette, ThemeModule};
pub use registration::ModuleRegistration;
pub use resolver::{Resolution, ThemeResolver, ThemeSource, SESSION_THEME_KEY};
pub use service::ModuleService;
