//! # Singleton Registry
//!
//! Lifecycle registry for named shared instances.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`alias`] | Alias → canonical name resolution with cycle detection |
//! | [`singleton`] | Three-tier singleton cache with reentrancy detection |
//! | [`graph`] | Containment and depends-on edges |
//! | [`destruction`] | Ordered teardown driven by the graph |
//! | [`derived`] | Cache of objects yielded by producer singletons |
//! | [`registry`] | The composed [`SingletonRegistry`] |

pub mod alias;
pub mod derived;
pub mod destruction;
pub mod graph;
pub mod registry;
pub mod singleton;

pub use alias::AliasRegistry;
pub use derived::producer_for;
pub use graph::DependencyGraph;
pub use registry::{RegistryOptions, SingletonRegistry};
pub use singleton::{EarlyProducer, SingletonCache, SingletonLock};
