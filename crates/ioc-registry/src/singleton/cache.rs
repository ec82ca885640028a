//! Singleton cache
//!
//! Holds one state slot per canonical name and hands out at most one
//! instance per name, exposing early references to break circular wiring.
//!
//! ## Locking
//!
//! ```text
//!   get(name) ──► slots (lock-free read) ──► hit: return
//!                        │
//!                        └─ in creation ──► singleton mutex ──► early reference
//!
//!   get_or_create / register / remove ──► singleton mutex ──► slots + CacheState
//! ```
//!
//! Every mutation of `slots` happens while holding the singleton mutex. The
//! mutex is reentrant so that a production callback may request further
//! names on the same thread; a request for the *same* name from the same
//! stack is rejected as `CurrentlyInCreation`.

use super::state::{EarlyProducer, EarlyReference, Slot};
use crate::derived::DerivedObjectCache;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use indexmap::IndexSet;
use ioc_domain::constants::SINGLETON_TABLE_CAPACITY;
use ioc_domain::error::{Error, Result};
use ioc_domain::value_objects::{MaybeInstance, SingletonState};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// State guarded by the singleton mutex
#[derive(Default)]
pub(crate) struct CacheState {
    /// Completed names in first-completion order
    registered: IndexSet<String>,
    /// Set once global destruction begins
    in_destruction: bool,
    /// Errors recorded during the outermost creation window
    suppressed: Option<Vec<Error>>,
    /// Objects yielded by producer singletons
    pub(crate) derived: DerivedObjectCache,
}

/// Held singleton mutex
///
/// Collaborators running extended creation phases hold this instead of a
/// lock of their own. The mutex is reentrant, so registry calls made while
/// holding it from the same thread do not deadlock.
pub struct SingletonLock<'a> {
    _guard: ReentrantMutexGuard<'a, RefCell<CacheState>>,
}

/// Three-tier singleton cache (complete / early reference / early producer)
pub struct SingletonCache {
    slots: DashMap<String, Slot>,
    exempt: DashSet<String>,
    mutex: ReentrantMutex<RefCell<CacheState>>,
}

impl SingletonCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: DashMap::with_capacity(SINGLETON_TABLE_CAPACITY),
            exempt: DashSet::new(),
            mutex: ReentrantMutex::new(RefCell::new(CacheState::default())),
        }
    }

    // ========================================================================
    // Shared mutex
    // ========================================================================

    /// Acquire the singleton mutex
    pub fn lock(&self) -> SingletonLock<'_> {
        SingletonLock {
            _guard: self.mutex.lock(),
        }
    }

    /// Run `f` while holding the singleton mutex
    pub fn synchronized<R>(&self, f: impl FnOnce() -> R) -> R {
        let _lock = self.lock();
        f()
    }

    /// Run `f` against the guarded state
    ///
    /// `f` must not call back into the cache.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut CacheState) -> R) -> R {
        let guard = self.mutex.lock();
        let mut state = guard.borrow_mut();
        f(&mut state)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// The complete instance for `name`, if one is cached
    ///
    /// The outer `Option` distinguishes "not cached" from a cached "no value".
    pub fn complete_instance(&self, name: &str) -> Option<MaybeInstance> {
        self.slots.get(name).and_then(|slot| match slot.value() {
            Slot::Complete(instance) => Some(instance.clone()),
            _ => None,
        })
    }

    /// Look up `name`, exposing an early reference if it is in creation
    ///
    /// When `allow_early` is set and the name has a pending early producer,
    /// the producer runs once and its result is kept for later requests.
    pub fn get(&self, name: &str, allow_early: bool) -> Result<Option<MaybeInstance>> {
        if let Some(instance) = self.complete_instance(name) {
            trace!(name = %name, "Returning cached singleton instance");
            return Ok(Some(instance));
        }
        if !self.is_in_creation(name) {
            return Ok(None);
        }

        let _lock = self.lock();
        let producer = {
            let Some(slot) = self.slots.get(name) else {
                return Ok(None);
            };
            match slot.value() {
                Slot::Complete(instance) => return Ok(Some(instance.clone())),
                Slot::InCreation(EarlyReference::Exposed(instance)) => {
                    return Ok(Some(instance.clone()));
                }
                Slot::InCreation(EarlyReference::Pending(producer)) if allow_early => {
                    Arc::clone(producer)
                }
                _ => return Ok(None),
            }
        };

        let early = producer()?;
        if let Some(mut slot) = self.slots.get_mut(name) {
            match slot.value_mut() {
                Slot::InCreation(reference @ EarlyReference::Pending(_)) => {
                    *reference = EarlyReference::Exposed(early.clone());
                }
                Slot::InCreation(EarlyReference::Exposed(existing)) => {
                    return Ok(Some(existing.clone()));
                }
                _ => {}
            }
        }
        trace!(name = %name, "Exposing early reference to singleton in creation");
        Ok(Some(early))
    }

    /// Return the cached instance for `name`, creating it with `producer` on a miss
    ///
    /// The whole operation runs under the singleton mutex, so concurrent
    /// callers for the same name wait for the first one and receive its
    /// instance; `producer` runs at most once per cached lifetime of `name`.
    pub fn get_or_create<F>(&self, name: &str, producer: F) -> Result<MaybeInstance>
    where
        F: FnOnce() -> Result<MaybeInstance>,
    {
        let _lock = self.lock();
        if let Some(instance) = self.complete_instance(name) {
            return Ok(instance);
        }
        if self.is_in_destruction() {
            return Err(Error::creation_not_allowed(name));
        }

        debug!(name = %name, "Creating shared instance of singleton");
        let mut window = CreationWindow::open(self, name)?;

        match producer() {
            Ok(instance) => {
                window.complete(instance.clone());
                Ok(instance)
            }
            Err(error) => {
                let suppressed = window.take_suppressed();
                drop(window);

                if matches!(error, Error::Conflict { .. }) {
                    if let Some(instance) = self.complete_instance(name) {
                        debug!(name = %name, "Singleton appeared during failed creation, using it");
                        return Ok(instance);
                    }
                }
                Err(wrap_creation_error(name, error).with_related_causes(suppressed))
            }
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register an already-built instance under `name`
    pub fn register_existing(&self, name: &str, instance: MaybeInstance) -> Result<()> {
        let _lock = self.lock();
        if self.complete_instance(name).is_some() {
            return Err(Error::conflict(format!(
                "Could not register object under name '{}': there is already an object bound",
                name
            )));
        }
        self.add_singleton(name, instance);
        Ok(())
    }

    /// Register a producer of early references for `name`
    ///
    /// Ignored once `name` has a complete instance; replaces any previously
    /// registered producer or exposed early reference otherwise.
    pub fn register_early_producer(&self, name: &str, producer: EarlyProducer) {
        let _lock = self.lock();
        match self.slots.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Early(producer));
            }
            Entry::Occupied(mut entry) => match entry.get_mut() {
                Slot::Complete(_) => {}
                Slot::Early(existing) => *existing = producer,
                Slot::InCreation(reference) => *reference = EarlyReference::Pending(producer),
            },
        }
    }

    /// Remove every trace of `name`, including its derived object
    pub fn remove(&self, name: &str) {
        let _lock = self.lock();
        self.slots.remove(name);
        self.with_state(|state| {
            state.registered.shift_remove(name);
            state.derived.remove(name);
        });
    }

    /// Drop every cached instance and derived object
    ///
    /// With `reset_destruction` set, the registry accepts creations again.
    pub fn clear(&self, reset_destruction: bool) {
        let _lock = self.lock();
        self.slots.clear();
        self.with_state(|state| {
            state.registered.clear();
            state.derived.clear();
            if reset_destruction {
                state.in_destruction = false;
            }
        });
    }

    fn add_singleton(&self, name: &str, instance: MaybeInstance) {
        self.slots
            .insert(name.to_string(), Slot::Complete(instance));
        self.with_state(|state| {
            state.registered.insert(name.to_string());
        });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether a complete instance is cached for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.complete_instance(name).is_some()
    }

    /// Completed names in first-completion order
    pub fn names(&self) -> Vec<String> {
        self.with_state(|state| state.registered.iter().cloned().collect())
    }

    /// Number of completed names
    pub fn count(&self) -> usize {
        self.with_state(|state| state.registered.len())
    }

    /// Observable lifecycle state of `name`
    pub fn state(&self, name: &str) -> SingletonState {
        self.slots
            .get(name)
            .map(|slot| slot.value().state())
            .unwrap_or_default()
    }

    /// Whether a production callback for `name` is running
    pub fn is_in_creation(&self, name: &str) -> bool {
        self.state(name).is_in_creation()
    }

    // ========================================================================
    // Reentrancy exemptions
    // ========================================================================

    /// Exempt `name` from in-creation tracking, or lift the exemption
    pub fn set_exempt(&self, name: &str, exempt: bool) {
        if exempt {
            self.exempt.insert(name.to_string());
        } else {
            self.exempt.remove(name);
        }
    }

    /// Whether `name` bypasses reentrancy detection
    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt.contains(name)
    }

    // ========================================================================
    // Suppressed errors and destruction flag
    // ========================================================================

    /// Record an error raised alongside the current creation attempt
    ///
    /// Returns `false` when no creation window is open and the error was
    /// discarded.
    pub fn on_suppressed_error(&self, error: Error) -> bool {
        self.with_state(|state| match state.suppressed.as_mut() {
            Some(suppressed) => {
                suppressed.push(error);
                true
            }
            None => false,
        })
    }

    /// Reject creations from now on
    pub fn mark_in_destruction(&self) {
        self.with_state(|state| state.in_destruction = true);
    }

    /// Accept creations again after a destruction
    pub fn reset_destruction(&self) {
        self.with_state(|state| state.in_destruction = false);
    }

    /// Whether global destruction has begun
    pub fn is_in_destruction(&self) -> bool {
        self.with_state(|state| state.in_destruction)
    }

    // ========================================================================
    // Creation bookkeeping
    // ========================================================================

    fn mark_in_creation(&self, name: &str) -> Result<()> {
        match self.slots.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::InCreation(EarlyReference::Unavailable));
            }
            Entry::Occupied(mut entry) => {
                let next = match entry.get() {
                    Slot::InCreation(_) => return Err(Error::currently_in_creation(name)),
                    Slot::Complete(_) => {
                        return Err(Error::conflict(format!(
                            "Singleton '{}' is already complete",
                            name
                        )));
                    }
                    Slot::Early(producer) => {
                        Slot::InCreation(EarlyReference::Pending(Arc::clone(producer)))
                    }
                };
                entry.insert(next);
            }
        }
        Ok(())
    }

    fn unmark_in_creation(&self, name: &str) {
        let restored = self
            .slots
            .remove_if(name, |_, slot| matches!(slot, Slot::InCreation(_)))
            .and_then(|(_, slot)| slot.abort_creation());
        if let Some(slot) = restored {
            self.slots.insert(name.to_string(), slot);
        }
    }
}

impl Default for SingletonCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SingletonCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonCache")
            .field("slots", &self.slots.len())
            .field("exempt", &self.exempt.len())
            .finish()
    }
}

/// One creation attempt: in-creation mark plus the suppressed-error window
///
/// Dropping the window without completing it unmarks the name, so a
/// failing or panicking callback never leaves a name stuck in creation.
struct CreationWindow<'a> {
    cache: &'a SingletonCache,
    name: &'a str,
    marked: bool,
    records_suppressed: bool,
}

impl<'a> CreationWindow<'a> {
    fn open(cache: &'a SingletonCache, name: &'a str) -> Result<Self> {
        let marked = !cache.is_exempt(name);
        if marked {
            cache.mark_in_creation(name)?;
        }
        let records_suppressed = cache.with_state(|state| {
            if state.suppressed.is_none() {
                state.suppressed = Some(Vec::new());
                true
            } else {
                false
            }
        });
        Ok(Self {
            cache,
            name,
            marked,
            records_suppressed,
        })
    }

    fn take_suppressed(&mut self) -> Vec<Error> {
        if !self.records_suppressed {
            return Vec::new();
        }
        self.records_suppressed = false;
        self.cache
            .with_state(|state| state.suppressed.take())
            .unwrap_or_default()
    }

    fn complete(mut self, instance: MaybeInstance) {
        self.marked = false;
        self.cache.add_singleton(self.name, instance);
    }
}

impl Drop for CreationWindow<'_> {
    fn drop(&mut self) {
        if self.records_suppressed {
            self.cache.with_state(|state| state.suppressed = None);
        }
        if self.marked {
            self.cache.unmark_in_creation(self.name);
        }
    }
}

fn wrap_creation_error(name: &str, error: Error) -> Error {
    match error {
        Error::CreationFailed { .. }
        | Error::CurrentlyInCreation { .. }
        | Error::CreationNotAllowed { .. } => error,
        other => Error::creation_failed_with_source(name, "Production callback failed", other),
    }
}
