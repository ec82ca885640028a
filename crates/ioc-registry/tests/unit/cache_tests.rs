//! Unit tests for the singleton cache through the registry facade

use ioc_domain::{Error, MaybeInstance, SharedInstance, SingletonState};
use ioc_registry::SingletonRegistry;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn value<T: Send + Sync + 'static>(v: T) -> MaybeInstance {
    Some(Arc::new(v))
}

fn unwrap_instance(instance: MaybeInstance) -> SharedInstance {
    instance.expect("instance should hold a value")
}

#[test]
fn test_get_or_create_runs_callback_once() {
    let registry = SingletonRegistry::new();
    let calls = AtomicUsize::new(0);

    let first = registry
        .get_or_create("service", || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(value(7_u32))
        })
        .expect("first");
    let second = registry
        .get_or_create("service", || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(value(8_u32))
        })
        .expect("second");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&unwrap_instance(first), &unwrap_instance(second)));
    assert_eq!(registry.state("service"), SingletonState::Complete);
}

#[test]
fn test_explicit_no_value_is_cached() {
    let registry = SingletonRegistry::new();
    let created = registry
        .get_or_create("nothing", || Ok(None))
        .expect("create");

    assert!(created.is_none());
    assert!(registry.contains_singleton("nothing"));
    assert!(matches!(registry.get("nothing"), Ok(Some(None))));
    assert!(matches!(registry.get("absent"), Ok(None)));
}

#[test]
fn test_get_resolves_aliases() {
    let registry = SingletonRegistry::new();
    registry.register_alias("dataSource", "db").expect("alias");
    registry
        .get_or_create("db", || Ok(value("pool")))
        .expect("create");

    assert!(registry.contains_singleton("dataSource"));
    assert_eq!(registry.singleton_names(), vec!["dataSource"]);
}

#[test]
fn test_reentrant_creation_is_rejected() {
    let registry = SingletonRegistry::new();

    let error = registry
        .get_or_create("loop", || {
            registry.get_or_create("loop", || Ok(value(1_u8)))?;
            Ok(value(2_u8))
        })
        .expect_err("same-stack request for the same name");

    assert!(error.is_currently_in_creation());
    assert_eq!(registry.state("loop"), SingletonState::Absent);
    assert!(!registry.is_in_creation("loop"));
}

#[test]
fn test_exempt_names_skip_reentrancy_detection() {
    let registry = SingletonRegistry::new();
    registry.set_exempt("infra", true);

    let result = registry.get_or_create("infra", || {
        let nested = registry.get_or_create("infra", || Ok(value("nested")))?;
        Ok(nested)
    });

    assert!(result.is_ok());
    assert!(registry.contains_singleton("infra"));
}

#[test]
fn test_callback_failure_is_wrapped_and_unmarked() {
    let registry = SingletonRegistry::new();

    let error = registry
        .get_or_create("broken", || Err(Error::generic("boom")))
        .expect_err("callback fails");

    assert!(error.is_creation_failed());
    assert!(std::error::Error::source(&error).is_some());
    assert_eq!(registry.state("broken"), SingletonState::Absent);

    let retried = registry.get_or_create("broken", || Ok(value("fixed")));
    assert!(retried.is_ok());
}

#[test]
fn test_suppressed_errors_become_related_causes() {
    let registry = SingletonRegistry::new();
    assert!(!registry.on_suppressed_error(Error::generic("outside any window")));

    let error = registry
        .get_or_create("outer", || {
            assert!(registry.on_suppressed_error(Error::generic("side failure")));
            Err(Error::generic("primary failure"))
        })
        .expect_err("callback fails");

    assert_eq!(error.related_causes().len(), 1);
    assert!(!registry.on_suppressed_error(Error::generic("window closed")));
}

#[test]
fn test_nested_failure_is_not_wrapped_twice() {
    let registry = SingletonRegistry::new();

    let error = registry
        .get_or_create("outer", || {
            registry.get_or_create("inner", || Err(Error::generic("inner failure")))?;
            Ok(value("unreachable"))
        })
        .expect_err("inner failure propagates");

    match error {
        Error::CreationFailed { name, .. } => assert_eq!(name, "inner"),
        other => panic!("Expected CreationFailed, got {other:?}"),
    }
}

#[test]
fn test_conflict_recovers_instance_registered_meanwhile() {
    let registry = SingletonRegistry::new();

    let created = registry
        .get_or_create("racy", || {
            registry.register_singleton("racy", value("registered"))?;
            Err(Error::conflict("someone else registered it"))
        })
        .expect("implicitly registered instance is used");

    assert!(created.is_some());
    assert_eq!(registry.state("racy"), SingletonState::Complete);
}

#[test]
fn test_register_existing_conflicts_with_complete_instance() {
    let registry = SingletonRegistry::new();
    registry
        .register_singleton("config", value("v1"))
        .expect("first");

    let error = registry
        .register_singleton("config", value("v2"))
        .expect_err("second registration");
    assert!(matches!(error, Error::Conflict { .. }));
}

#[test]
fn test_early_reference_breaks_circular_wiring() {
    let registry = SingletonRegistry::new();
    let early_calls = Arc::new(AtomicUsize::new(0));
    let early_a: SharedInstance = Arc::new("early a".to_string());

    let a = registry
        .get_or_create("a", || {
            let counter = Arc::clone(&early_calls);
            let early = Arc::clone(&early_a);
            registry.register_early_producer("a", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(Some(Arc::clone(&early)))
            });

            registry.get_or_create("b", || {
                assert!(matches!(registry.get_with_early("a", false), Ok(None)));
                let first = registry.get("a")?.flatten().expect("early reference");
                let second = registry.get("a")?.flatten().expect("early reference");
                assert!(Arc::ptr_eq(&first, &second));
                Ok(value("b"))
            })?;
            Ok(value("final a".to_string()))
        })
        .expect("circular wiring resolves");

    assert_eq!(early_calls.load(Ordering::SeqCst), 1);
    assert!(!Arc::ptr_eq(&unwrap_instance(a), &early_a));
    assert_eq!(registry.singleton_names(), vec!["b", "a"]);
}

#[test]
fn test_early_producer_only_served_while_in_creation() {
    let registry = SingletonRegistry::new();
    registry.register_early_producer("lazy", || Ok(Some(Arc::new(1_u8))));

    assert_eq!(registry.state("lazy"), SingletonState::EarlyReferenceAvailable);
    assert!(matches!(registry.get("lazy"), Ok(None)));
    assert!(!registry.contains_singleton("lazy"));
}

#[test]
fn test_early_producer_survives_failed_creation() {
    let registry = SingletonRegistry::new();
    registry.register_early_producer("flaky", || Ok(Some(Arc::new(1_u8))));

    let result = registry.get_or_create("flaky", || Err(Error::generic("not yet")));
    assert!(result.is_err());
    assert_eq!(registry.state("flaky"), SingletonState::EarlyReferenceAvailable);
}

#[test]
fn test_early_producer_ignored_once_complete() {
    let registry = SingletonRegistry::new();
    registry
        .get_or_create("done", || Ok(value(1_u8)))
        .expect("create");
    registry.register_early_producer("done", || Ok(None));

    assert_eq!(registry.state("done"), SingletonState::Complete);
}

#[test]
fn test_registration_order_and_removal() {
    let registry = SingletonRegistry::new();
    for name in ["c", "a", "b"] {
        registry
            .get_or_create(name, || Ok(value(name.to_string())))
            .expect("create");
    }
    assert_eq!(registry.singleton_names(), vec!["c", "a", "b"]);

    registry.remove_singleton("a");
    assert_eq!(registry.singleton_names(), vec!["c", "b"]);
    assert_eq!(registry.singleton_count(), 2);
    assert_eq!(registry.state("a"), SingletonState::Absent);
}

#[test]
fn test_get_typed_downcasts() {
    let registry = SingletonRegistry::new();
    registry
        .register_singleton("port", value(8080_u16))
        .expect("register");

    let port = registry.get_typed::<u16>("port").expect("typed");
    assert_eq!(port.as_deref(), Some(&8080));
    assert!(registry.get_typed::<String>("port").is_err());
    assert!(matches!(registry.get_typed::<u16>("missing"), Ok(None)));
}

#[test]
fn test_synchronized_is_reentrant() {
    let registry = SingletonRegistry::new();
    let created = registry.synchronized(|| {
        let _lock = registry.lock();
        registry.get_or_create("guarded", || Ok(value("ok")))
    });
    assert!(created.is_ok());
}
