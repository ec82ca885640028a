//! Singleton cache and its per-name state machine

pub mod cache;
pub(crate) mod state;

pub use cache::{SingletonCache, SingletonLock};
pub use state::EarlyProducer;
