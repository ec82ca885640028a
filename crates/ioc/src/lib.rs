//! # IoC Singleton Registry
//!
//! Registry for named shared instances: canonical names through aliases,
//! at most one instance per name even under concurrent demand, early
//! references for circular wiring and teardown ordered by recorded
//! dependencies.
//!
//! ## Crates
//!
//! | Crate | Description |
//! |-------|-------------|
//! | [`domain`] | Error type, instances, port traits |
//! | [`registry`] | Alias registry, singleton cache, dependency graph, derived objects |
//! | [`infrastructure`] | Configuration, logging, placeholders, bootstrap |
//!
//! ## Example
//!
//! ```
//! use ioc::prelude::*;
//! use std::sync::Arc;
//!
//! let registry = SingletonRegistry::new();
//! registry
//!     .get_or_create("greeting", || Ok(Some(Arc::new("hello".to_string()))))
//!     .unwrap();
//!
//! let greeting = registry.get_typed::<String>("greeting").unwrap();
//! assert_eq!(greeting.as_deref().map(String::as_str), Some("hello"));
//!
//! registry.destroy_all();
//! assert_eq!(registry.singleton_count(), 0);
//! ```

pub use ioc_domain as domain;
pub use ioc_infrastructure as infrastructure;
pub use ioc_registry as registry;

pub use ioc_domain::{
    Disposable, Error, MaybeInstance, NameResolver, ObjectProducer, ProducedObjectPostProcessor,
    ProducerInstance, Result, SharedInstance, SingletonState,
};
pub use ioc_infrastructure::{
    AppConfig, ConfigBuilder, ConfigLoader, ErrorContext, PlaceholderResolver, RegistryContext,
    init_registry,
};
pub use ioc_registry::{AliasRegistry, RegistryOptions, SingletonRegistry};

/// Commonly used types
pub mod prelude {
    pub use ioc_domain::value_objects::downcast_instance;
    pub use ioc_domain::{
        Disposable, Error, MaybeInstance, NameResolver, ObjectProducer, ProducerInstance, Result,
        SharedInstance, SingletonState,
    };
    pub use ioc_infrastructure::{ErrorContext, RegistryContext, init_registry};
    pub use ioc_registry::{RegistryOptions, SingletonRegistry};
}
