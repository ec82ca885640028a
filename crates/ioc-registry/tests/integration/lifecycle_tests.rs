//! End-to-end registry lifecycle: wiring, lookup, teardown

use ioc_domain::{Disposable, Error, MaybeInstance, Result, SingletonState};
use ioc_registry::SingletonRegistry;
use std::sync::{Arc, Mutex};

struct Repository {
    name: &'static str,
}

struct Service {
    repository: MaybeInstance,
}

/// Test a small object graph built, queried and torn down in order
#[test]
fn test_wiring_and_teardown() {
    let registry = SingletonRegistry::new();
    let disposed = Arc::new(Mutex::new(Vec::new()));
    registry.register_alias("repository", "repo").expect("alias");

    let service = registry
        .get_or_create("service", || {
            let repository = registry.get_or_create("repo", || {
                Ok(Some(Arc::new(Repository { name: "orders" })))
            })?;
            registry.register_dependency("repository", "service");
            Ok(Some(Arc::new(Service { repository })))
        })
        .expect("service");
    assert!(service.is_some());

    for name in ["repository", "service"] {
        let log = Arc::clone(&disposed);
        let handle: Arc<dyn Disposable> = Arc::new(move || -> Result<()> {
            log.lock().expect("log lock").push(name);
            Ok(())
        });
        registry.register_disposable(name, handle);
    }

    let service = registry
        .get_typed::<Service>("service")
        .expect("typed")
        .expect("present");
    let repository = service
        .repository
        .as_ref()
        .and_then(|instance| instance.downcast_ref::<Repository>())
        .expect("repository");
    assert_eq!(repository.name, "orders");
    assert_eq!(registry.singleton_names(), vec!["repository", "service"]);

    registry.destroy_all();

    assert_eq!(*disposed.lock().expect("log lock"), vec!["service", "repository"]);
    assert_eq!(registry.state("service"), SingletonState::Absent);
    assert!(matches!(
        registry.get_or_create("service", || Ok(None)),
        Err(Error::CreationNotAllowed { .. })
    ));
}

/// Test mutual references resolved through an early reference
#[test]
fn test_mutual_references_through_early_reference() {
    let registry = SingletonRegistry::new();
    let shared_a: Arc<Mutex<Option<MaybeInstance>>> = Arc::new(Mutex::new(None));

    registry
        .get_or_create("a", || {
            let early = Arc::new("a (early)".to_string());
            registry.register_early_producer("a", move || Ok(Some(early.clone())));

            registry.get_or_create("b", || {
                let a = registry.get("a")?;
                *shared_a.lock().expect("lock") = a.clone();
                Ok(Some(Arc::new("b".to_string())))
            })?;
            Ok(Some(Arc::new("a".to_string())))
        })
        .expect("a");

    let seen = shared_a.lock().expect("lock").clone().flatten();
    let seen = seen.expect("b saw an early reference to a");
    assert_eq!(seen.downcast_ref::<String>().map(String::as_str), Some("a (early)"));
    assert!(registry.contains_singleton("a"));
    assert!(registry.contains_singleton("b"));
}
