//! Composition root
//!
//! Builds a [`SingletonRegistry`] from configuration and owns its
//! lifecycle.
//!
//! ```text
//! AppConfig ──► RegistryOptions ──► SingletonRegistry
//!     │                                  ▲
//!     ├── aliases ───────────────────────┤ register_alias
//!     └── placeholders ─► PlaceholderResolver ─► resolve_aliases
//! ```
//!
//! ## Usage
//!
//! ```
//! use ioc_infrastructure::bootstrap::init_registry;
//! use ioc_infrastructure::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .with_property("env", "prod")
//!     .with_alias("dataSource", "db-${env}")
//!     .build();
//! let context = init_registry(config).unwrap();
//! assert_eq!(context.registry().canonical_name("db-prod"), "dataSource");
//! context.shutdown();
//! ```

use crate::config::AppConfig;
use crate::config::loader::validate_app_config;
use crate::placeholder::PlaceholderResolver;
use ioc_domain::error::Result;
use ioc_registry::SingletonRegistry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Registry together with the configuration it was built from
pub struct RegistryContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    registry: Arc<SingletonRegistry>,
    resolver: Arc<PlaceholderResolver>,
    shut_down: AtomicBool,
}

impl RegistryContext {
    /// The shared registry
    pub fn registry(&self) -> Arc<SingletonRegistry> {
        Arc::clone(&self.registry)
    }

    /// Resolver built from the placeholder configuration
    pub fn resolver(&self) -> Arc<PlaceholderResolver> {
        Arc::clone(&self.resolver)
    }

    /// Destroy every singleton; later calls do nothing
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            debug!("Registry already shut down");
            return;
        }
        info!("Shutting down singleton registry");
        self.registry.destroy_all();
    }

    /// Whether [`shutdown`](Self::shutdown) has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for RegistryContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryContext")
            .field("registry", &self.registry)
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

/// Build the registry described by `config`
///
/// Configured aliases are registered in declaration order, then their
/// placeholders are resolved in one atomic pass.
pub fn init_registry(config: AppConfig) -> Result<RegistryContext> {
    validate_app_config(&config)?;

    let registry = Arc::new(SingletonRegistry::with_options(config.registry.into()));
    for entry in &config.aliases {
        registry.register_alias(&entry.name, &entry.alias)?;
    }

    let resolver = Arc::new(PlaceholderResolver::new(&config.placeholders));
    if !config.aliases.is_empty() {
        registry.resolve_aliases(resolver.as_ref())?;
    }

    info!(
        aliases = registry.aliases().alias_count(),
        "Singleton registry initialized"
    );
    Ok(RegistryContext {
        config: Arc::new(config),
        registry,
        resolver,
        shut_down: AtomicBool::new(false),
    })
}
