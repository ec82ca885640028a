//! Derived-object cache
//!
//! Objects yielded by producer singletons are cached apart from the
//! producers themselves. The table lives inside the singleton cache's
//! guarded state, so every read and invalidation happens under the one
//! singleton mutex.

use crate::registry::SingletonRegistry;
use ioc_domain::constants::EARLY_TABLE_CAPACITY;
use ioc_domain::error::{Error, Result};
use ioc_domain::ports::ObjectProducer;
use ioc_domain::value_objects::names::{is_factory_dereference, transformed_name};
use ioc_domain::value_objects::{MaybeInstance, ProducerInstance, SharedInstance};
use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

/// Produced objects keyed by producer name
pub(crate) struct DerivedObjectCache {
    objects: HashMap<String, MaybeInstance>,
    post_processing: HashSet<String>,
}

impl DerivedObjectCache {
    pub(crate) fn get(&self, name: &str) -> Option<MaybeInstance> {
        self.objects.get(name).cloned()
    }

    pub(crate) fn insert(&mut self, name: &str, object: MaybeInstance) {
        self.objects.insert(name.to_string(), object);
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.objects.remove(name);
    }

    pub(crate) fn clear(&mut self) {
        self.objects.clear();
        self.post_processing.clear();
    }

    pub(crate) fn is_post_processing(&self, name: &str) -> bool {
        self.post_processing.contains(name)
    }

    pub(crate) fn begin_post_processing(&mut self, name: &str) {
        self.post_processing.insert(name.to_string());
    }

    pub(crate) fn end_post_processing(&mut self, name: &str) {
        self.post_processing.remove(name);
    }
}

impl Default for DerivedObjectCache {
    fn default() -> Self {
        Self {
            objects: HashMap::with_capacity(EARLY_TABLE_CAPACITY),
            post_processing: HashSet::new(),
        }
    }
}

impl SingletonRegistry {
    /// Obtain the object yielded by the producer registered under `name`
    ///
    /// The producer must be a complete singleton whose instance wraps an
    /// [`ObjectProducer`] (see [`ProducerInstance`]). A leading `&` on
    /// `name` returns the producer instance itself instead of its object.
    pub fn get_produced_object(
        &self,
        name: &str,
        is_singleton_producer: bool,
        should_post_process: bool,
    ) -> Result<MaybeInstance> {
        let canonical = self.canonical_name(transformed_name(name));
        let instance = self
            .cache()
            .complete_instance(&canonical)
            .flatten()
            .ok_or_else(|| Error::not_found(format!("producer '{}'", canonical)))?;
        let producer = producer_for(&canonical, &instance)?;
        if is_factory_dereference(name) {
            return Ok(Some(instance));
        }
        self.object_from_producer(
            producer.as_ref(),
            &canonical,
            is_singleton_producer,
            should_post_process,
        )
    }

    /// Obtain the object yielded by `producer` on behalf of `name`
    ///
    /// Singleton producers that are cached under `name` get their object
    /// produced once and cached; every other producer yields a fresh object
    /// per call.
    pub fn object_from_producer(
        &self,
        producer: &dyn ObjectProducer,
        name: &str,
        is_singleton_producer: bool,
        should_post_process: bool,
    ) -> Result<MaybeInstance> {
        let cache = self.cache();
        if !(is_singleton_producer && cache.contains(name)) {
            let object = self.produce(producer, name)?;
            return match object {
                Some(object) if should_post_process => self
                    .post_process(object, name, "Post-processing of producer's object failed")
                    .map(Some),
                other => Ok(other),
            };
        }

        let _lock = cache.lock();
        if let Some(cached) = cache.with_state(|state| state.derived.get(name)) {
            trace!(name = %name, "Returning cached produced object");
            return Ok(cached);
        }

        let mut object = self.produce(producer, name)?;

        // The producer may have triggered a nested request that cached it already
        if let Some(already_there) = cache.with_state(|state| state.derived.get(name)) {
            return Ok(already_there);
        }

        if let Some(produced) = object.take() {
            if should_post_process {
                let reentrant = cache.is_in_creation(name)
                    || cache.with_state(|state| state.derived.is_post_processing(name));
                if reentrant {
                    debug!(name = %name, "Returning produced object before post-processing");
                    return Ok(Some(produced));
                }
                cache.with_state(|state| state.derived.begin_post_processing(name));
                let processed = self.post_process(
                    produced,
                    name,
                    "Post-processing of producer's singleton object failed",
                );
                cache.with_state(|state| state.derived.end_post_processing(name));
                object = Some(processed?);
            } else {
                object = Some(produced);
            }
        }

        if cache.contains(name) {
            cache.with_state(|state| state.derived.insert(name, object.clone()));
        }
        Ok(object)
    }

    /// The cached object of the producer registered under `name`, if any
    pub fn cached_produced_object(&self, name: &str) -> Option<MaybeInstance> {
        let canonical = self.canonical_name(transformed_name(name));
        self.cache()
            .with_state(|state| state.derived.get(&canonical))
    }

    /// Type of the object `producer` yields, if it can tell without producing
    pub fn producer_object_type(&self, producer: &dyn ObjectProducer) -> Option<TypeId> {
        producer.object_type()
    }

    fn produce(&self, producer: &dyn ObjectProducer, name: &str) -> Result<MaybeInstance> {
        let object = producer.produce().map_err(|error| match error {
            Error::CurrentlyInCreation { .. } => error,
            other => Error::creation_failed_with_source(
                name,
                "Producer threw error on object creation",
                other,
            ),
        })?;

        if object.is_none() && self.cache().is_in_creation(name) {
            return Err(Error::currently_in_creation_with_message(
                name,
                "Producer which is currently in creation returned no value",
            ));
        }
        Ok(object)
    }

    fn post_process(
        &self,
        object: SharedInstance,
        name: &str,
        failure: &str,
    ) -> Result<SharedInstance> {
        self.post_processor()
            .post_process(object, name)
            .map_err(|error| Error::creation_failed_with_source(name, failure, error))
    }
}

/// Recover the producer wrapped by a singleton instance
pub fn producer_for(name: &str, instance: &SharedInstance) -> Result<Arc<dyn ObjectProducer>> {
    ProducerInstance::from_instance(instance).ok_or_else(|| {
        Error::creation_failed(name, "Singleton instance is not an object producer")
    })
}
