//! Dependency Injection Container for Lineage
//!
//! This crate provides a service locator for wiring application services,
//! plus child scopes that live for exactly one request. A scope sees every
//! registration of its parent, caches its own `Scoped` instances, and accepts
//! ready-made instances through [`DIContainer::instance`] so that middleware
//! can bind a per-request value (for example the active theme) that handlers
//! resolve later instead of recomputing it.
//!
//! ## Quick Start
//!
//! ```rust
//! use lineage_di::DIContainer;
//! use std::sync::Arc;
//!
//! struct Greeting(&'static str);
//!
//! let root = Arc::new(DIContainer::new());
//! root.register(|_| Ok(Arc::new(Greeting("hello")))).unwrap();
//!
//! let scope = root.create_scope();
//! assert_eq!(scope.resolve::<Greeting>().unwrap().0, "hello");
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// Errors that can occur during dependency injection operations
#[derive(Debug, thiserror::Error)]
pub enum DIError {
    #[error("Service not registered: {service_type}")]
    ServiceNotRegistered { service_type: String },

    #[error("Service already registered: {service_type}")]
    ServiceAlreadyRegistered { service_type: String },

    #[error("Invalid service type: {message}")]
    InvalidServiceType { message: String },

    #[error("Dependency resolution failed: {message}")]
    DependencyResolutionFailed { message: String },
}

pub type DIResult<T> = Result<T, DIError>;

/// Service lifetime management
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLifetime {
    /// Service is created once and reused for the entire application lifetime
    Singleton,
    /// Service is created each time it's requested
    Transient,
    /// Service is created once per scope
    Scoped,
}

type ErasedService = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&DIContainer) -> DIResult<ErasedService> + Send + Sync>;

/// Service descriptor containing registration information
struct ServiceDescriptor {
    factory: Option<Factory>,
    lifetime: ServiceLifetime,
    instance: Option<ErasedService>,
}

/// The dependency injection container
pub struct DIContainer {
    services: RwLock<HashMap<TypeId, ServiceDescriptor>>,
    scoped_instances: RwLock<HashMap<TypeId, ErasedService>>,
    parent: Option<Arc<DIContainer>>,
}

impl DIContainer {
    /// Create a new empty DI container
    pub fn new() -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
            scoped_instances: RwLock::new(HashMap::new()),
            parent: None,
        }
    }

    /// Create a child scope of `parent`.
    pub fn scoped(parent: Arc<DIContainer>) -> Self {
        Self {
            services: RwLock::new(HashMap::new()),
            scoped_instances: RwLock::new(HashMap::new()),
            parent: Some(parent),
        }
    }

    /// Create a child scope of this container.
    pub fn create_scope(self: &Arc<Self>) -> DIContainer {
        Self::scoped(Arc::clone(self))
    }

    /// Whether this container is a child scope.
    pub fn is_scope(&self) -> bool {
        self.parent.is_some()
    }

    /// Register a service with a factory function
    pub fn register<F, T>(&self, factory: F) -> DIResult<()>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.register_with_lifetime(factory, ServiceLifetime::Singleton)?;
        debug!("Registered service: {}", std::any::type_name::<T>());
        Ok(())
    }

    /// Register a transient service
    pub fn register_transient<F, T>(&self, factory: F) -> DIResult<()>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.register_with_lifetime(factory, ServiceLifetime::Transient)?;
        debug!("Registered transient service: {}", std::any::type_name::<T>());
        Ok(())
    }

    /// Register a service that is created once per scope.
    ///
    /// The factory receives the scope doing the resolving, so scoped services
    /// can depend on instances bound into that scope.
    pub fn register_scoped<F, T>(&self, factory: F) -> DIResult<()>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.register_with_lifetime(factory, ServiceLifetime::Scoped)?;
        debug!("Registered scoped service: {}", std::any::type_name::<T>());
        Ok(())
    }

    fn register_with_lifetime<F, T>(&self, factory: F, lifetime: ServiceLifetime) -> DIResult<()>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        let mut services = self.write_services();

        if services.contains_key(&type_id) {
            return Err(DIError::ServiceAlreadyRegistered {
                service_type: std::any::type_name::<T>().to_string(),
            });
        }

        let wrapped_factory: Factory = Arc::new(move |container: &DIContainer| -> DIResult<ErasedService> {
            let result = factory(container)?;
            Ok(result as ErasedService)
        });

        services.insert(
            type_id,
            ServiceDescriptor {
                factory: Some(wrapped_factory),
                lifetime,
                instance: None,
            },
        );
        Ok(())
    }

    /// Bind a ready-made instance.
    ///
    /// Unlike the `register*` family this replaces an existing binding for
    /// `T`, and it only affects this container (a scope's binding shadows the
    /// parent's).
    pub fn instance<T>(&self, value: Arc<T>)
    where
        T: Send + Sync + 'static,
    {
        let previous = self.write_services().insert(
            TypeId::of::<T>(),
            ServiceDescriptor {
                factory: None,
                lifetime: ServiceLifetime::Singleton,
                instance: Some(value as ErasedService),
            },
        );

        if previous.is_some() {
            debug!("Rebound instance: {}", std::any::type_name::<T>());
        } else {
            debug!("Bound instance: {}", std::any::type_name::<T>());
        }
    }

    /// Resolve a service instance
    pub fn resolve<T>(&self) -> DIResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let instance = self.resolve_erased(TypeId::of::<T>(), type_name, self)?;
        instance.downcast::<T>().map_err(|_| DIError::InvalidServiceType {
            message: format!("Service type mismatch during downcast: {}", type_name),
        })
    }

    /// Resolve a service, or `None` if nothing is registered for it.
    pub fn try_resolve<T>(&self) -> DIResult<Option<Arc<T>>>
    where
        T: Send + Sync + 'static,
    {
        match self.resolve::<T>() {
            Ok(service) => Ok(Some(service)),
            Err(DIError::ServiceNotRegistered { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn resolve_erased(
        &self,
        type_id: TypeId,
        type_name: &str,
        scope: &DIContainer,
    ) -> DIResult<ErasedService> {
        // Copy out what we need so factories can resolve their own dependencies
        // without re-entering a held lock.
        let found = self
            .read_services()
            .get(&type_id)
            .map(|d| (d.lifetime, d.instance.clone(), d.factory.clone()));

        let Some((lifetime, instance, factory)) = found else {
            return match &self.parent {
                Some(parent) => parent.resolve_erased(type_id, type_name, scope),
                None => Err(DIError::ServiceNotRegistered {
                    service_type: type_name.to_string(),
                }),
            };
        };

        if let Some(instance) = instance {
            return Ok(instance);
        }

        let factory = factory.ok_or_else(|| DIError::DependencyResolutionFailed {
            message: format!("{} has neither an instance nor a factory", type_name),
        })?;

        match lifetime {
            ServiceLifetime::Singleton => {
                let created = factory(self)?;
                let mut services = self.write_services();
                match services.get_mut(&type_id) {
                    Some(descriptor) => Ok(descriptor.instance.get_or_insert(created).clone()),
                    None => Ok(created),
                }
            }
            ServiceLifetime::Transient => factory(scope),
            ServiceLifetime::Scoped => {
                if let Some(existing) = scope.read_scoped().get(&type_id) {
                    return Ok(existing.clone());
                }
                let created = factory(scope)?;
                Ok(scope
                    .write_scoped()
                    .entry(type_id)
                    .or_insert(created)
                    .clone())
            }
        }
    }

    /// Check if a service is registered here or in any parent scope
    pub fn is_registered<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        self.read_services().contains_key(&TypeId::of::<T>())
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.is_registered::<T>())
    }

    /// Get the number of services registered directly in this container
    pub fn service_count(&self) -> usize {
        self.read_services().len()
    }

    /// Clear all registered services
    pub fn clear(&self) {
        self.write_services().clear();
        self.write_scoped().clear();
        info!("Cleared all services from DI container");
    }

    fn read_services(&self) -> RwLockReadGuard<'_, HashMap<TypeId, ServiceDescriptor>> {
        self.services.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_services(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, ServiceDescriptor>> {
        self.services.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_scoped(&self) -> RwLockReadGuard<'_, HashMap<TypeId, ErasedService>> {
        self.scoped_instances.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_scoped(&self) -> RwLockWriteGuard<'_, HashMap<TypeId, ErasedService>> {
        self.scoped_instances.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DIContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DIContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DIContainer")
            .field("service_count", &self.service_count())
            .field("is_scope", &self.is_scope())
            .finish()
    }
}

/// Builder pattern for configuring the DI container
pub struct DIContainerBuilder {
    container: DIContainer,
}

impl DIContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: DIContainer::new(),
        }
    }

    /// Register a service
    pub fn register<F, T>(self, factory: F) -> DIResult<Self>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.container.register(factory)?;
        Ok(self)
    }

    /// Register a transient service
    pub fn register_transient<F, T>(self, factory: F) -> DIResult<Self>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.container.register_transient(factory)?;
        Ok(self)
    }

    /// Register a scoped service
    pub fn register_scoped<F, T>(self, factory: F) -> DIResult<Self>
    where
        F: Fn(&DIContainer) -> DIResult<Arc<T>> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        self.container.register_scoped(factory)?;
        Ok(self)
    }

    /// Bind a ready-made instance
    pub fn instance<T>(self, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.container.instance(value);
        self
    }

    /// Build the container
    pub fn build(self) -> DIContainer {
        self.container
    }
}

impl Default for DIContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience macro for registering services
#[macro_export]
macro_rules! register_service {
    ($container:expr, $service_type:ty, $factory:expr) => {
        $container.register::<_, $service_type>($factory)
    };
}

/// Convenience macro for resolving services
#[macro_export]
macro_rules! resolve_service {
    ($container:expr, $service_type:ty) => {
        $container.resolve::<$service_type>()
    };
}
