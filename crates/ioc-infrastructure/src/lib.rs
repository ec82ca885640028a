//! # Infrastructure Layer
//!
//! Cross-cutting concerns around the singleton registry.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bootstrap`] | Composition root building the registry from configuration |
//! | [`config`] | Figment-based layered configuration |
//! | [`constants`] | Centralized defaults |
//! | [`error_ext`] | Context extensions for foreign errors |
//! | [`logging`] | Structured logging with tracing |
//! | [`placeholder`] | `${key}` placeholder resolution for names |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod placeholder;

pub use bootstrap::{RegistryContext, init_registry};
pub use config::{AppConfig, ConfigBuilder, ConfigLoader};
pub use error_ext::ErrorContext;
pub use placeholder::PlaceholderResolver;
