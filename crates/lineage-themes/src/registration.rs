//! Auto-discovery of compiled-in modules using the inventory crate
//!
//! Any crate linked into the binary can contribute modules:
//!
//! ```rust,ignore
//! use lineage_themes::{Module, ModuleRegistration};
//! use std::sync::Arc;
//!
//! fn my_theme() -> Arc<dyn Module> {
//!     Arc::new(MyTheme::default())
//! }
//!
//! inventory::submit! { ModuleRegistration::new("my-theme", my_theme) }
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::module::Module;

/// A module registration descriptor collected via inventory
pub struct ModuleRegistration {
    /// Module name, for diagnostics
    pub name: &'static str,

    /// Creates the module instance
    pub factory: fn() -> Arc<dyn Module>,

    /// Registration order (lower = earlier, default = 100)
    pub priority: u32,
}

impl ModuleRegistration {
    /// Create a new module registration with default priority
    pub const fn new(name: &'static str, factory: fn() -> Arc<dyn Module>) -> Self {
        Self {
            name,
            factory,
            priority: 100,
        }
    }

    /// Create a new module registration with custom priority
    pub const fn with_priority(
        name: &'static str,
        factory: fn() -> Arc<dyn Module>,
        priority: u32,
    ) -> Self {
        Self {
            name,
            factory,
            priority,
        }
    }
}

inventory::collect!(ModuleRegistration);

/// Instantiate every discovered module, ordered by priority then name
pub fn discovered_modules() -> Vec<Arc<dyn Module>> {
    let mut registrations: Vec<&ModuleRegistration> =
        inventory::iter::<ModuleRegistration>().collect();
    registrations.sort_by_key(|r| (r.priority, r.name));

    info!(
        "Discovered {} module registrations via inventory",
        registrations.len()
    );

    registrations
        .into_iter()
        .map(|registration| {
            debug!(
                "Instantiating module '{}' (priority: {})",
                registration.name, registration.priority
            );
            (registration.factory)()
        })
        .collect()
}

/// List all discovered module names.
///
/// Useful for debugging and diagnostics.
pub fn list_discovered_registrations() -> Vec<&'static str> {
    inventory::iter::<ModuleRegistration>()
        .map(|r| r.name)
        .collect()
}
