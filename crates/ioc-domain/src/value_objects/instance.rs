//! Shared instances
//!
//! Instances are type-erased and shared between the registry and every
//! caller that obtained them. A registered singleton may explicitly hold
//! "no value", which is modelled as `None` rather than a sentinel object.

use crate::ports::ObjectProducer;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased instance shared by the registry and its callers
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// A singleton value: `None` records an explicit "no value"
pub type MaybeInstance = Option<SharedInstance>;

/// Downcast a shared instance to a concrete type
///
/// Returns `None` when the instance is of another type.
pub fn downcast_instance<T: Any + Send + Sync>(instance: &SharedInstance) -> Option<Arc<T>> {
    Arc::clone(instance).downcast::<T>().ok()
}

/// Wrapper that lets a producer be stored as a singleton instance
///
/// # Example
///
/// ```
/// use ioc_domain::{MaybeInstance, ObjectProducer, ProducerInstance, Result};
/// use std::sync::Arc;
///
/// struct Numbers;
///
/// impl ObjectProducer for Numbers {
///     fn produce(&self) -> Result<MaybeInstance> {
///         Ok(Some(Arc::new(42_u32)))
///     }
/// }
///
/// let instance = ProducerInstance::new(Arc::new(Numbers)).into_shared();
/// assert!(ProducerInstance::from_instance(&instance).is_some());
/// ```
#[derive(Clone)]
pub struct ProducerInstance {
    producer: Arc<dyn ObjectProducer>,
}

impl ProducerInstance {
    /// Wrap a producer
    pub fn new(producer: Arc<dyn ObjectProducer>) -> Self {
        Self { producer }
    }

    /// The wrapped producer
    pub fn producer(&self) -> Arc<dyn ObjectProducer> {
        Arc::clone(&self.producer)
    }

    /// Erase the wrapper into a shared instance suitable for registration
    pub fn into_shared(self) -> SharedInstance {
        Arc::new(self)
    }

    /// Recover the producer from a shared instance, if it wraps one
    pub fn from_instance(instance: &SharedInstance) -> Option<Arc<dyn ObjectProducer>> {
        let any: &(dyn Any + Send + Sync) = instance.as_ref();
        any.downcast_ref::<ProducerInstance>()
            .map(ProducerInstance::producer)
    }
}

impl fmt::Debug for ProducerInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerInstance")
            .field("singleton", &self.producer.is_singleton())
            .finish()
    }
}
