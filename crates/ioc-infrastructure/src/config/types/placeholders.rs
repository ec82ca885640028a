//! Placeholder configuration types

use crate::constants::{
    DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_PLACEHOLDER_SUFFIX, DEFAULT_PLACEHOLDER_VALUE_SEPARATOR,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder syntax and the properties placeholders resolve against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Opening delimiter
    pub prefix: String,

    /// Closing delimiter
    pub suffix: String,

    /// Separator between key and default value; `None` disables defaults
    pub value_separator: Option<String>,

    /// Leave unresolvable placeholders in place instead of failing
    pub ignore_unresolvable: bool,

    /// Property values keyed by placeholder key
    pub properties: BTreeMap<String, String>,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            suffix: DEFAULT_PLACEHOLDER_SUFFIX.to_string(),
            value_separator: Some(DEFAULT_PLACEHOLDER_VALUE_SEPARATOR.to_string()),
            ignore_unresolvable: false,
            properties: BTreeMap::new(),
        }
    }
}
