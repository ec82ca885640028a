//! Main application configuration

use serde::{Deserialize, Serialize};

pub use super::logging::LoggingConfig;
pub use super::placeholders::PlaceholderConfig;
pub use super::registry::{AliasConfig, RegistryConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Registry policies
    pub registry: RegistryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Placeholder syntax and properties
    pub placeholders: PlaceholderConfig,

    /// Aliases registered at bootstrap
    pub aliases: Vec<AliasConfig>,
}
