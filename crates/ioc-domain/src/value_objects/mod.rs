//! Value Objects
//!
//! Immutable values exchanged between the registry and its callers.

/// Shared instances and the producer wrapper
pub mod instance;
/// Naming conventions
pub mod names;
/// Observable singleton lifecycle state
pub mod state;

pub use instance::{MaybeInstance, ProducerInstance, SharedInstance, downcast_instance};
pub use state::SingletonState;
