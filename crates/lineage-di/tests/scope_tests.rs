//! Tests for child scopes and scoped lifetimes
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lineage_di::*;

struct Config {
    name: &'static str,
}

struct RequestId(usize);

struct Bound(&'static str);

#[test]
fn test_scope_sees_parent_singletons() {
    let root = Arc::new(DIContainer::new());
    root.register(|_| Ok(Arc::new(Config { name: "site" }))).unwrap();

    let scope_a = root.create_scope();
    let scope_b = root.create_scope();

    let from_a = scope_a.resolve::<Config>().unwrap();
    let from_b = scope_b.resolve::<Config>().unwrap();

    assert_eq!(from_a.name, "site");
    assert!(Arc::ptr_eq(&from_a, &from_b));
    assert!(scope_a.is_scope());
    assert!(!root.is_scope());
}

#[test]
fn test_scoped_service_is_cached_per_scope() {
    let counter = Arc::new(AtomicUsize::new(0));
    let root = Arc::new(DIContainer::new());
    let seen = Arc::clone(&counter);
    root.register_scoped(move |_| Ok(Arc::new(RequestId(seen.fetch_add(1, Ordering::SeqCst)))))
        .unwrap();

    let scope_a = root.create_scope();
    let first = scope_a.resolve::<RequestId>().unwrap();
    let again = scope_a.resolve::<RequestId>().unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    let scope_b = root.create_scope();
    let other = scope_b.resolve::<RequestId>().unwrap();
    assert_ne!(first.0, other.0);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn test_scoped_factory_sees_scope_instances() {
    struct Greeting(String);

    let root = Arc::new(DIContainer::new());
    root.register_scoped(|scope| {
        let bound = scope.resolve::<Bound>()?;
        Ok(Arc::new(Greeting(format!("hello {}", bound.0))))
    })
    .unwrap();

    let scope = root.create_scope();
    scope.instance(Arc::new(Bound("clouds")));

    assert_eq!(scope.resolve::<Greeting>().unwrap().0, "hello clouds");
}

#[test]
fn test_scope_instance_shadows_parent() {
    let root = Arc::new(DIContainer::new());
    root.instance(Arc::new(Bound("root")));

    let scope = root.create_scope();
    scope.instance(Arc::new(Bound("request")));

    assert_eq!(scope.resolve::<Bound>().unwrap().0, "request");
    assert_eq!(root.resolve::<Bound>().unwrap().0, "root");
}

#[test]
fn test_scope_without_binding_reports_missing() {
    let root = Arc::new(DIContainer::new());
    let scope = DIContainer::scoped(Arc::clone(&root));

    assert!(matches!(
        scope.resolve::<Bound>(),
        Err(DIError::ServiceNotRegistered { .. })
    ));
}
