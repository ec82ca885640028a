//! Registry bootstrap from configuration

use ioc_domain::{Disposable, Error, Result};
use ioc_infrastructure::config::{ConfigBuilder, ConfigLoader, RegistryConfig};
use ioc_infrastructure::init_registry;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Test that configured aliases are registered and their placeholders resolved
#[test]
fn test_init_registry_resolves_configured_aliases() {
    let config = ConfigBuilder::new()
        .with_property("env", "prod")
        .with_alias("dataSource", "db-${env}")
        .with_alias("dataSource", "primary")
        .build();

    let context = init_registry(config).expect("bootstrap");
    let registry = context.registry();

    assert_eq!(registry.canonical_name("db-prod"), "dataSource");
    assert_eq!(registry.canonical_name("primary"), "dataSource");
    assert!(!registry.is_alias("db-${env}"));
}

/// Test that an alias cycle in configuration fails bootstrap
#[test]
fn test_init_registry_rejects_alias_cycles() {
    let config = ConfigBuilder::new()
        .with_alias("a", "b")
        .with_alias("b", "a")
        .build();

    let error = init_registry(config).expect_err("cycle");
    assert!(matches!(error, Error::CircularReference { .. }));
}

/// Test that an unresolvable placeholder drops the alias instead of failing
#[test]
fn test_init_registry_drops_unresolvable_aliases() {
    let config = ConfigBuilder::new()
        .with_alias("service", "svc-${missing}")
        .build();

    let context = init_registry(config).expect("bootstrap");
    assert_eq!(context.registry().aliases().alias_count(), 0);
}

/// Test that overriding policy flows from configuration into the registry
#[test]
fn test_init_registry_applies_overriding_policy() {
    let config = ConfigBuilder::new()
        .with_registry(RegistryConfig {
            allow_alias_overriding: false,
            reset_after_destroy: false,
        })
        .with_alias("first", "shared")
        .with_alias("second", "shared")
        .build();

    assert!(matches!(
        init_registry(config),
        Err(Error::Conflict { .. })
    ));
}

/// Test that shutdown destroys singletons exactly once
#[test]
fn test_shutdown_is_idempotent() {
    let context = init_registry(ConfigBuilder::new().build()).expect("bootstrap");
    let registry = context.registry();
    let disposals = Arc::new(AtomicUsize::new(0));

    registry
        .get_or_create("service", || Ok(Some(Arc::new("service"))))
        .expect("create");
    let counter = Arc::clone(&disposals);
    let handle: Arc<dyn Disposable> = Arc::new(move || -> Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    registry.register_disposable("service", handle);

    context.shutdown();
    context.shutdown();

    assert!(context.is_shut_down());
    assert_eq!(disposals.load(Ordering::SeqCst), 1);
    assert_eq!(registry.singleton_count(), 0);
}

/// Test the full path from a TOML file to a running registry
#[test]
fn test_bootstrap_from_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ioc.toml");
    fs::write(
        &path,
        r#"
[registry]
reset_after_destroy = true

[placeholders.properties]
region = "eu"

[[aliases]]
name = "cache"
alias = "cache-${region}"
"#,
    )
    .expect("write config");

    let config = ConfigLoader::new()
        .with_config_path(&path)
        .with_env_prefix("IOC_TEST_UNSET")
        .load()
        .expect("load");
    let context = init_registry(config).expect("bootstrap");
    let registry = context.registry();

    assert_eq!(registry.canonical_name("cache-eu"), "cache");
    registry
        .get_or_create("cache-eu", || Ok(None))
        .expect("create");

    context.shutdown();
    assert!(!registry.is_in_destruction());
    assert!(registry.get_or_create("cache", || Ok(None)).is_ok());
}
