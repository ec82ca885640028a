//! Dependency graph
//!
//! Records which names contain which, and which names depend on which.
//! The two dependency directions are written together under one lock so
//! they never disagree. Traversals carry a visited set; the graph may
//! contain cycles.

use indexmap::{IndexMap, IndexSet};
use ioc_domain::constants::DEPENDENCY_MAP_CAPACITY;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::trace;

type Edges = IndexMap<String, IndexSet<String>>;

#[derive(Default)]
struct GraphState {
    /// outer → names it contains
    contained: Edges,
    /// name → names that depend on it
    dependents: Edges,
    /// name → names it depends on
    dependencies: Edges,
}

/// Containment and depends-on edges between canonical names
pub struct DependencyGraph {
    state: Mutex<GraphState>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GraphState {
                contained: IndexMap::with_capacity(DEPENDENCY_MAP_CAPACITY / 4),
                dependents: IndexMap::with_capacity(DEPENDENCY_MAP_CAPACITY),
                dependencies: IndexMap::with_capacity(DEPENDENCY_MAP_CAPACITY),
            }),
        }
    }

    /// Record that `dependent` depends on `name`
    pub fn register_dependency(&self, name: &str, dependent: &str) {
        let mut state = self.state.lock();
        let added = state
            .dependents
            .entry(name.to_string())
            .or_default()
            .insert(dependent.to_string());
        if !added {
            return;
        }
        state
            .dependencies
            .entry(dependent.to_string())
            .or_default()
            .insert(name.to_string());
        trace!(name = %name, dependent = %dependent, "Dependency registered");
    }

    /// Record that `outer` contains `inner`
    ///
    /// The outer name also becomes a dependent of the inner one, so the
    /// inner name is destroyed first.
    pub fn register_containment(&self, outer: &str, inner: &str) {
        let added = self
            .state
            .lock()
            .contained
            .entry(outer.to_string())
            .or_default()
            .insert(inner.to_string());
        if added {
            self.register_dependency(inner, outer);
        }
    }

    /// Whether `candidate` depends on `name`, directly or transitively
    ///
    /// `canonical` maps stored names onto canonical ones before each step.
    pub fn is_dependent(
        &self,
        name: &str,
        candidate: &str,
        canonical: &dyn Fn(&str) -> String,
    ) -> bool {
        let state = self.state.lock();
        let mut visited = HashSet::new();
        let mut pending = vec![canonical(name)];

        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(dependents) = state.dependents.get(&current) else {
                continue;
            };
            if dependents.contains(candidate) {
                return true;
            }
            pending.extend(dependents.iter().map(|dependent| canonical(dependent)));
        }
        false
    }

    /// Names that depend on `name`
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        collect(&self.state.lock().dependents, name)
    }

    /// Names `name` depends on
    pub fn dependencies_of(&self, name: &str) -> Vec<String> {
        collect(&self.state.lock().dependencies, name)
    }

    /// Names contained in `name`
    pub fn contained_in(&self, name: &str) -> Vec<String> {
        collect(&self.state.lock().contained, name)
    }

    /// Whether anything depends on `name`
    pub fn has_dependents(&self, name: &str) -> bool {
        self.state
            .lock()
            .dependents
            .get(name)
            .is_some_and(|dependents| !dependents.is_empty())
    }

    /// Remove and return the dependents of `name`
    pub fn take_dependents(&self, name: &str) -> Vec<String> {
        take(&mut self.state.lock().dependents, name)
    }

    /// Remove and return the names contained in `name`
    pub fn take_contained(&self, name: &str) -> Vec<String> {
        take(&mut self.state.lock().contained, name)
    }

    /// Drop `name` from every remaining edge set
    pub fn purge(&self, name: &str) {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        for edges in [&mut state.contained, &mut state.dependents] {
            edges.retain(|_, names| {
                names.shift_remove(name);
                !names.is_empty()
            });
        }
        state.dependencies.shift_remove(name);
    }

    /// Number of recorded edges across all three maps
    pub fn edge_count(&self) -> usize {
        let state = self.state.lock();
        [&state.contained, &state.dependents, &state.dependencies]
            .iter()
            .flat_map(|edges| edges.values())
            .map(IndexSet::len)
            .sum()
    }

    /// Whether no edges are recorded
    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Forget every edge
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.contained.clear();
        state.dependents.clear();
        state.dependencies.clear();
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("edges", &self.edge_count())
            .finish()
    }
}

fn collect(edges: &Edges, name: &str) -> Vec<String> {
    edges
        .get(name)
        .map(|names| names.iter().cloned().collect())
        .unwrap_or_default()
}

fn take(edges: &mut Edges, name: &str) -> Vec<String> {
    edges
        .shift_remove(name)
        .map(|names| names.into_iter().collect())
        .unwrap_or_default()
}
