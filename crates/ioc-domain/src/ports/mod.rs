//! Domain Port Interfaces
//!
//! Contracts between the registry and the collaborators it never looks
//! inside of. The registry only ever calls these; it never constructs or
//! inspects the objects behind them.
//!
//! ## Organization
//!
//! - **disposal** - teardown handles invoked during destruction
//! - **producer** - producer-type singletons and post-processing of what they yield
//! - **resolver** - string transformation applied to names during deferred resolution

/// Teardown handles invoked during destruction
pub mod disposal;
/// Producer-type singletons and post-processing hooks
pub mod producer;
/// Name placeholder resolution
pub mod resolver;

pub use disposal::Disposable;
pub use producer::{IdentityPostProcessor, ObjectProducer, ProducedObjectPostProcessor};
pub use resolver::NameResolver;
