//! Configuration
//!
//! Layered configuration loaded with figment: built-in defaults, then a
//! TOML file, then `IOC__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AliasConfig, AppConfig, LoggingConfig, PlaceholderConfig, RegistryConfig};
