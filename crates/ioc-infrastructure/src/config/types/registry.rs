//! Registry configuration types

use ioc_registry::RegistryOptions;
use serde::{Deserialize, Serialize};

/// Singleton registry policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Let a later alias registration repoint an existing alias
    pub allow_alias_overriding: bool,

    /// Accept creations again once full destruction finished
    pub reset_after_destroy: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let options = RegistryOptions::default();
        Self {
            allow_alias_overriding: options.allow_alias_overriding,
            reset_after_destroy: options.reset_after_destroy,
        }
    }
}

impl From<RegistryConfig> for RegistryOptions {
    fn from(config: RegistryConfig) -> Self {
        Self {
            allow_alias_overriding: config.allow_alias_overriding,
            reset_after_destroy: config.reset_after_destroy,
        }
    }
}

/// Alias declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Name the alias stands for
    pub name: String,
    /// The alias itself; may contain placeholders
    pub alias: String,
}

impl AliasConfig {
    /// Declare `alias` for `name`
    pub fn new<N: Into<String>, A: Into<String>>(name: N, alias: A) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }
}
