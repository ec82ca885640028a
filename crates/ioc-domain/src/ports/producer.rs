//! Producer ports
//!
//! A producer is a singleton whose only purpose is to yield a second,
//! user-visible object. The registry caches what a singleton producer yields
//! separately from the producer itself.

use crate::error::Result;
use crate::value_objects::{MaybeInstance, SharedInstance};
use std::any::TypeId;

/// A singleton that yields another object on demand
pub trait ObjectProducer: Send + Sync {
    /// Produce the user-visible object
    ///
    /// `Ok(None)` is a legitimate "no value" result, except while the
    /// owning name is still under construction.
    fn produce(&self) -> Result<MaybeInstance>;

    /// Whether the produced object is shared (cached) or fresh per request
    fn is_singleton(&self) -> bool {
        true
    }

    /// Type of the produced object, if known before producing it
    fn object_type(&self) -> Option<TypeId> {
        None
    }
}

/// Hook applied to objects obtained from a producer
pub trait ProducedObjectPostProcessor: Send + Sync {
    /// Transform the freshly produced object for `name`
    fn post_process(&self, object: SharedInstance, name: &str) -> Result<SharedInstance>;
}

/// Post-processor that hands back the object untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityPostProcessor;

impl ProducedObjectPostProcessor for IdentityPostProcessor {
    fn post_process(&self, object: SharedInstance, _name: &str) -> Result<SharedInstance> {
        Ok(object)
    }
}

impl<F> ProducedObjectPostProcessor for F
where
    F: Fn(SharedInstance, &str) -> Result<SharedInstance> + Send + Sync,
{
    fn post_process(&self, object: SharedInstance, name: &str) -> Result<SharedInstance> {
        self(object, name)
    }
}
