//! Singleton registry facade
//!
//! Composes the alias registry, singleton cache, dependency graph and
//! disposal handles behind one explicit object. Every name handed in is
//! resolved to its canonical form before it reaches a component.

use crate::alias::AliasRegistry;
use crate::graph::DependencyGraph;
use crate::singleton::{SingletonCache, SingletonLock};
use indexmap::IndexMap;
use ioc_domain::error::{Error, Result};
use ioc_domain::ports::{Disposable, IdentityPostProcessor, NameResolver, ProducedObjectPostProcessor};
use ioc_domain::value_objects::{MaybeInstance, SingletonState, downcast_instance};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Policies fixed at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryOptions {
    /// Let an alias be repointed at a different name
    pub allow_alias_overriding: bool,
    /// Accept creations again once `destroy_all` finished
    pub reset_after_destroy: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            allow_alias_overriding: true,
            reset_after_destroy: false,
        }
    }
}

/// Shared singleton registry
///
/// # Example
///
/// ```
/// use ioc_registry::SingletonRegistry;
/// use std::sync::Arc;
///
/// let registry = SingletonRegistry::new();
/// registry.register_alias("dataSource", "db").unwrap();
///
/// let created = registry
///     .get_or_create("db", || Ok(Some(Arc::new("pool".to_string()))))
///     .unwrap();
/// assert!(created.is_some());
/// assert!(registry.contains_singleton("dataSource"));
/// ```
pub struct SingletonRegistry {
    aliases: AliasRegistry,
    cache: SingletonCache,
    graph: DependencyGraph,
    pub(crate) disposables: Mutex<IndexMap<String, Arc<dyn Disposable>>>,
    post_processor: RwLock<Arc<dyn ProducedObjectPostProcessor>>,
    pub(crate) reset_after_destroy: bool,
}

impl SingletonRegistry {
    /// Create a registry with default options
    pub fn new() -> Self {
        Self::with_options(RegistryOptions::default())
    }

    /// Create a registry with explicit options
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            aliases: AliasRegistry::with_overriding(options.allow_alias_overriding),
            cache: SingletonCache::new(),
            graph: DependencyGraph::new(),
            disposables: Mutex::new(IndexMap::new()),
            post_processor: RwLock::new(Arc::new(IdentityPostProcessor)),
            reset_after_destroy: options.reset_after_destroy,
        }
    }

    /// The alias registry
    pub fn aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    /// The singleton cache
    pub fn cache(&self) -> &SingletonCache {
        &self.cache
    }

    /// The dependency graph
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    // ========================================================================
    // Aliases
    // ========================================================================

    /// Register `alias` for `name`
    pub fn register_alias(&self, name: &str, alias: &str) -> Result<()> {
        self.aliases.register_alias(name, alias)
    }

    /// Remove a registered alias
    pub fn remove_alias(&self, alias: &str) -> Result<()> {
        self.aliases.remove_alias(alias)
    }

    /// Whether `name` is registered as an alias
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.is_alias(name)
    }

    /// Whether `alias` resolves to `name`
    pub fn has_alias(&self, name: &str, alias: &str) -> bool {
        self.aliases.has_alias(name, alias)
    }

    /// Every alias that resolves to `name`
    pub fn aliases_of(&self, name: &str) -> Vec<String> {
        self.aliases.aliases_of(name)
    }

    /// Canonical form of `name`
    pub fn canonical_name(&self, name: &str) -> String {
        self.aliases.canonical_name(name)
    }

    /// Rewrite every alias entry with `resolver`
    pub fn resolve_aliases(&self, resolver: &dyn NameResolver) -> Result<()> {
        self.aliases.resolve_aliases(resolver)
    }

    // ========================================================================
    // Singletons
    // ========================================================================

    /// Look up `name`, exposing an early reference if it is in creation
    pub fn get(&self, name: &str) -> Result<Option<MaybeInstance>> {
        self.get_with_early(name, true)
    }

    /// Look up `name`; early producers only run when `allow_early` is set
    pub fn get_with_early(&self, name: &str, allow_early: bool) -> Result<Option<MaybeInstance>> {
        self.cache.get(&self.canonical_name(name), allow_early)
    }

    /// Look up `name` and downcast the instance to `T`
    ///
    /// Returns `Ok(None)` when nothing (or an explicit "no value") is cached.
    pub fn get_typed<T: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<T>>> {
        let Some(Some(instance)) = self.get(name)? else {
            return Ok(None);
        };
        downcast_instance::<T>(&instance).map(Some).ok_or_else(|| {
            Error::generic(format!(
                "Singleton '{}' is not of type {}",
                name,
                std::any::type_name::<T>()
            ))
        })
    }

    /// Return the cached instance for `name`, creating it with `producer` on a miss
    pub fn get_or_create<F>(&self, name: &str, producer: F) -> Result<MaybeInstance>
    where
        F: FnOnce() -> Result<MaybeInstance>,
    {
        self.cache.get_or_create(&self.canonical_name(name), producer)
    }

    /// Register an already-built instance
    pub fn register_singleton(&self, name: &str, instance: MaybeInstance) -> Result<()> {
        self.cache
            .register_existing(&self.canonical_name(name), instance)
    }

    /// Register a producer of early references for `name`
    pub fn register_early_producer<F>(&self, name: &str, producer: F)
    where
        F: Fn() -> Result<MaybeInstance> + Send + Sync + 'static,
    {
        self.cache
            .register_early_producer(&self.canonical_name(name), Arc::new(producer));
    }

    /// Remove every cached trace of `name` without running its disposal handle
    pub fn remove_singleton(&self, name: &str) {
        self.cache.remove(&self.canonical_name(name));
    }

    /// Whether a complete instance is cached for `name`
    pub fn contains_singleton(&self, name: &str) -> bool {
        self.cache.contains(&self.canonical_name(name))
    }

    /// Completed names in first-completion order
    pub fn singleton_names(&self) -> Vec<String> {
        self.cache.names()
    }

    /// Number of completed names
    pub fn singleton_count(&self) -> usize {
        self.cache.count()
    }

    /// Lifecycle state of `name`
    pub fn state(&self, name: &str) -> SingletonState {
        self.cache.state(&self.canonical_name(name))
    }

    /// Whether `name` is in creation
    pub fn is_in_creation(&self, name: &str) -> bool {
        self.cache.is_in_creation(&self.canonical_name(name))
    }

    /// Exempt `name` from reentrancy detection, or lift the exemption
    pub fn set_exempt(&self, name: &str, exempt: bool) {
        self.cache.set_exempt(&self.canonical_name(name), exempt);
    }

    /// Record an error raised alongside the current creation attempt
    pub fn on_suppressed_error(&self, error: Error) -> bool {
        self.cache.on_suppressed_error(error)
    }

    /// Acquire the shared singleton mutex
    pub fn lock(&self) -> SingletonLock<'_> {
        self.cache.lock()
    }

    /// Run `f` while holding the shared singleton mutex
    pub fn synchronized<R>(&self, f: impl FnOnce() -> R) -> R {
        self.cache.synchronized(f)
    }

    // ========================================================================
    // Dependencies
    // ========================================================================

    /// Record that `dependent` depends on `name`
    pub fn register_dependency(&self, name: &str, dependent: &str) {
        self.graph
            .register_dependency(&self.canonical_name(name), &self.canonical_name(dependent));
    }

    /// Record that `outer` contains `inner`
    pub fn register_containment(&self, outer: &str, inner: &str) {
        self.graph
            .register_containment(&self.canonical_name(outer), &self.canonical_name(inner));
    }

    /// Whether `candidate` depends on `name`, directly or transitively
    pub fn is_dependent(&self, name: &str, candidate: &str) -> bool {
        let canonical = |value: &str| self.canonical_name(value);
        self.graph
            .is_dependent(name, &self.canonical_name(candidate), &canonical)
    }

    /// Names that depend on `name`
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.graph.dependents_of(&self.canonical_name(name))
    }

    /// Names `name` depends on
    pub fn dependencies_of(&self, name: &str) -> Vec<String> {
        self.graph.dependencies_of(&self.canonical_name(name))
    }

    /// Whether anything depends on `name`
    pub fn has_dependents(&self, name: &str) -> bool {
        self.graph.has_dependents(&self.canonical_name(name))
    }

    // ========================================================================
    // Destruction flag and post-processing
    // ========================================================================

    /// Whether `destroy_all` has begun and creations are rejected
    pub fn is_in_destruction(&self) -> bool {
        self.cache.is_in_destruction()
    }

    /// Accept creations again after `destroy_all`
    pub fn reset_destruction(&self) {
        self.cache.reset_destruction();
    }

    /// Replace the hook applied to produced objects
    pub fn set_post_processor(&self, post_processor: Arc<dyn ProducedObjectPostProcessor>) {
        *self.post_processor.write() = post_processor;
    }

    pub(crate) fn post_processor(&self) -> Arc<dyn ProducedObjectPostProcessor> {
        Arc::clone(&*self.post_processor.read())
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonRegistry")
            .field("aliases", &self.aliases.alias_count())
            .field("singletons", &self.cache.count())
            .field("disposables", &self.disposables.lock().len())
            .field("graph", &self.graph)
            .finish()
    }
}
