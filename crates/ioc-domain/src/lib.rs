//! # Domain Layer
//!
//! Shared vocabulary of the IoC singleton registry: the error type, the
//! value types handed between the registry and its callers, and the port
//! traits collaborators implement (disposal handles, producers,
//! post-processors and name resolvers).
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error enum and `Result` alias |
//! | [`constants`] | Naming conventions and capacity hints |
//! | [`ports`] | Traits implemented by collaborators |
//! | [`value_objects`] | Instances, singleton states and name helpers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::{Disposable, NameResolver, ObjectProducer, ProducedObjectPostProcessor};
pub use value_objects::{MaybeInstance, ProducerInstance, SharedInstance, SingletonState};
