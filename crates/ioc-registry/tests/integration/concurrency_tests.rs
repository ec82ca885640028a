//! Concurrent access to the shared registry

use ioc_domain::{MaybeInstance, ObjectProducer, ProducerInstance, Result, SharedInstance};
use ioc_registry::SingletonRegistry;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;

struct SlowProducer {
    calls: AtomicUsize,
}

impl ObjectProducer for SlowProducer {
    fn produce(&self) -> Result<MaybeInstance> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok(Some(Arc::new("O".to_string())))
    }
}

/// Test that concurrent callers share one instance and one callback run
#[test]
fn test_concurrent_get_or_create_runs_callback_once() {
    let registry = SingletonRegistry::new();
    let calls = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let instances: Vec<SharedInstance> = thread::scope(|scope| {
        let (registry, calls, barrier) = (&registry, &calls, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(move || {
                    barrier.wait();
                    registry
                        .get_or_create("shared", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(20));
                            Ok(Some(Arc::new(42_u64)))
                        })
                        .expect("create")
                        .expect("value")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(instances.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

/// Test that the post-processing hook runs once for concurrent producer lookups
#[test]
fn test_concurrent_get_produced_object_post_processes_once() {
    let registry = SingletonRegistry::new();
    let processed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&processed);
    registry.set_post_processor(Arc::new(
        move |object: SharedInstance, _name: &str| -> Result<SharedInstance> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(object)
        },
    ));

    let producer = Arc::new(SlowProducer {
        calls: AtomicUsize::new(0),
    });
    registry
        .register_singleton(
            "P",
            Some(ProducerInstance::new(producer.clone()).into_shared()),
        )
        .expect("register producer");

    let barrier = Barrier::new(2);
    let (first, second) = thread::scope(|scope| {
        let lookup = || {
            barrier.wait();
            registry
                .get_produced_object("P", true, true)
                .expect("produced")
                .expect("object")
        };
        let a = scope.spawn(lookup);
        let b = scope.spawn(lookup);
        (
            a.join().expect("thread panicked"),
            b.join().expect("thread panicked"),
        )
    });

    assert_eq!(processed.load(Ordering::SeqCst), 1);
    assert_eq!(producer.calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
}

/// Test that distinct names are created independently under contention
#[test]
fn test_concurrent_distinct_names() {
    let registry = SingletonRegistry::new();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for index in 0..THREADS {
            let registry = &registry;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                let name = format!("bean-{index}");
                registry
                    .get_or_create(&name, || Ok(Some(Arc::new(index))))
                    .expect("create");
            });
        }
    });

    assert_eq!(registry.singleton_count(), THREADS);
}

/// Test that alias writes and canonical reads interleave safely
#[test]
fn test_concurrent_alias_registration() {
    let registry = SingletonRegistry::new();
    let barrier = Barrier::new(THREADS);

    thread::scope(|scope| {
        for index in 0..THREADS {
            let registry = &registry;
            let barrier = &barrier;
            scope.spawn(move || {
                barrier.wait();
                let alias = format!("alias-{index}");
                registry
                    .register_alias("target", &alias)
                    .expect("register alias");
                assert_eq!(registry.canonical_name(&alias), "target");
            });
        }
    });

    assert_eq!(registry.aliases_of("target").len(), THREADS);
}
