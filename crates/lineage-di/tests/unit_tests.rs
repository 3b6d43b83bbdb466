//! Unit tests for the DI container core functionality
use std::sync::Arc;

use lineage_di::*;

#[derive(Debug, PartialEq)]
struct TestService {
    value: i32,
}

#[test]
fn test_register_and_resolve_singleton() {
    let container = DIContainer::new();

    container
        .register(|_| Ok(Arc::new(TestService { value: 42 })))
        .unwrap();

    let service1 = container.resolve::<TestService>().unwrap();
    let service2 = container.resolve::<TestService>().unwrap();

    // Should be the same instance (singleton)
    assert_eq!(service1.value, 42);
    assert!(Arc::ptr_eq(&service1, &service2));
}

#[test]
fn test_register_transient() {
    let container = DIContainer::new();

    container
        .register_transient(|_| Ok(Arc::new(TestService { value: 42 })))
        .unwrap();

    let service1 = container.resolve::<TestService>().unwrap();
    let service2 = container.resolve::<TestService>().unwrap();

    assert_eq!(service2.value, 42);
    assert!(!Arc::ptr_eq(&service1, &service2));
}

#[test]
fn test_service_not_registered() {
    let container = DIContainer::new();

    let result = container.resolve::<TestService>();
    assert!(matches!(result, Err(DIError::ServiceNotRegistered { .. })));
}

#[test]
fn test_service_already_registered() {
    let container = DIContainer::new();

    container
        .register(|_| Ok(Arc::new(TestService { value: 42 })))
        .unwrap();

    let result = container.register(|_| Ok(Arc::new(TestService { value: 24 })));
    assert!(matches!(
        result,
        Err(DIError::ServiceAlreadyRegistered { .. })
    ));
}

#[test]
fn test_builder_pattern() {
    let container = DIContainerBuilder::new()
        .register(|_| Ok(Arc::new(TestService { value: 42 })))
        .unwrap()
        .build();

    let service = container.resolve::<TestService>().unwrap();
    assert_eq!(service.value, 42);
}

#[test]
fn test_factory_error_propagates() {
    let container = DIContainer::new();
    container
        .register::<_, TestService>(|_| {
            Err(DIError::DependencyResolutionFailed {
                message: "database offline".to_string(),
            })
        })
        .unwrap();

    let err = container.resolve::<TestService>().unwrap_err();
    assert!(err.to_string().contains("database offline"));
}

#[test]
fn test_clear_removes_services() {
    let container = DIContainer::new();
    container
        .register(|_| Ok(Arc::new(TestService { value: 1 })))
        .unwrap();
    assert_eq!(container.service_count(), 1);

    container.clear();
    assert_eq!(container.service_count(), 0);
    assert!(!container.is_registered::<TestService>());
}
