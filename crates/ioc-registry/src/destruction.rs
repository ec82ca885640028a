//! Destruction orchestrator
//!
//! Tears singletons down in an order that respects recorded edges:
//! dependents before the names they depend on, contained names as part of
//! their outer name. Edges are consumed as they are followed, so a name
//! reachable along several paths is disposed at most once and cyclic graphs
//! terminate.

use crate::registry::SingletonRegistry;
use ioc_domain::ports::Disposable;
use std::sync::Arc;
use tracing::{debug, error, info};

impl SingletonRegistry {
    /// Register the disposal handle run when `name` is destroyed
    ///
    /// A later registration for the same name replaces the handle but keeps
    /// its place in destruction order.
    pub fn register_disposable(&self, name: &str, handle: Arc<dyn Disposable>) {
        let canonical = self.canonical_name(name);
        debug!(name = %canonical, "Disposal handle registered");
        self.disposables.lock().insert(canonical, handle);
    }

    /// Whether a disposal handle is registered for `name`
    pub fn has_disposable(&self, name: &str) -> bool {
        self.disposables
            .lock()
            .contains_key(&self.canonical_name(name))
    }

    /// Destroy every singleton
    ///
    /// Creation is rejected from the moment this starts. Disposal handles run
    /// in reverse registration order; afterwards the graph and the cache are
    /// empty. The registry stays closed for creation unless it was built with
    /// `reset_after_destroy` or [`reset_destruction`](Self::reset_destruction)
    /// is called.
    pub fn destroy_all(&self) {
        self.cache().mark_in_destruction();

        let names: Vec<String> = self.disposables.lock().keys().rev().cloned().collect();
        info!(count = names.len(), "Destroying singletons");
        for name in &names {
            self.destroy_singleton(name);
        }

        self.graph().clear();
        self.disposables.lock().clear();
        self.cache().clear(self.reset_after_destroy);
        debug!("Singleton registry cleared");
    }

    /// Destroy `name` together with everything that depends on it
    ///
    /// Destroying a name that is already gone is a no-op.
    pub fn destroy_singleton(&self, name: &str) {
        let canonical = self.canonical_name(name);
        self.cache().remove(&canonical);
        let handle = self.disposables.lock().shift_remove(&canonical);
        self.destroy_one(&canonical, handle);
    }

    fn destroy_one(&self, name: &str, handle: Option<Arc<dyn Disposable>>) {
        let dependents = self.graph().take_dependents(name);
        if !dependents.is_empty() {
            debug!(name = %name, dependents = ?dependents, "Destroying dependents first");
        }
        for dependent in &dependents {
            self.destroy_singleton(dependent);
        }

        if let Some(handle) = handle {
            match handle.dispose() {
                Ok(()) => debug!(name = %name, "Singleton disposed"),
                Err(e) => error!(name = %name, error = %e, "Disposal handle failed"),
            }
        }

        for inner in self.graph().take_contained(name) {
            self.destroy_singleton(&inner);
        }

        self.graph().purge(name);
    }
}
