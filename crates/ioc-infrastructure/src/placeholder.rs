//! Placeholder resolution for names
//!
//! Replaces `${key}` style placeholders in alias and canonical names with
//! configured property values. Supports defaults (`${key:fallback}`),
//! placeholders nested inside keys (`${env.${profile}}`) and values that
//! themselves contain placeholders. Recursive definitions are rejected.

use crate::config::PlaceholderConfig;
use ioc_domain::error::{Error, Result};
use ioc_domain::ports::NameResolver;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Resolves placeholders against a fixed property table
#[derive(Debug, Clone)]
pub struct PlaceholderResolver {
    prefix: String,
    suffix: String,
    simple_prefix: String,
    value_separator: Option<String>,
    ignore_unresolvable: bool,
    properties: BTreeMap<String, String>,
}

impl PlaceholderResolver {
    /// Build a resolver from configuration
    pub fn new(config: &PlaceholderConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            suffix: config.suffix.clone(),
            simple_prefix: simple_prefix(&config.prefix, &config.suffix),
            value_separator: config.value_separator.clone(),
            ignore_unresolvable: config.ignore_unresolvable,
            properties: config.properties.clone(),
        }
    }

    /// Add or replace a property
    pub fn with_property<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace every placeholder in `value`
    pub fn resolve_placeholders(&self, value: &str) -> Result<String> {
        self.parse(value, &mut HashSet::new())
    }

    fn parse(&self, value: &str, visiting: &mut HashSet<String>) -> Result<String> {
        let Some(mut start) = value.find(&self.prefix) else {
            return Ok(value.to_string());
        };
        let mut result = value.to_string();

        loop {
            let Some(end) = self.placeholder_end(&result, start) else {
                break;
            };
            let original = result[start + self.prefix.len()..end].to_string();
            if !visiting.insert(original.clone()) {
                return Err(Error::configuration(format!(
                    "Circular placeholder reference '{}' in property definitions",
                    original
                )));
            }

            // Keys may contain placeholders of their own
            let key = self.parse(&original, visiting)?;
            let resolved = match self.lookup(&key) {
                Some(found) => Some(self.parse(&found, visiting)?),
                None => None,
            };

            let next = match resolved {
                Some(replacement) => {
                    result.replace_range(start..end + self.suffix.len(), &replacement);
                    start + replacement.len()
                }
                None if self.ignore_unresolvable => end + self.suffix.len(),
                None => {
                    return Err(Error::configuration(format!(
                        "Could not resolve placeholder '{}' in value \"{}\"",
                        key, value
                    )));
                }
            };
            visiting.remove(&original);

            match result.get(next..).and_then(|rest| rest.find(&self.prefix)) {
                Some(offset) => start = next + offset,
                None => break,
            }
        }
        Ok(result)
    }

    /// Property value for `key`, falling back to an inline default
    fn lookup(&self, key: &str) -> Option<String> {
        if let Some(value) = self.properties.get(key) {
            return Some(value.clone());
        }
        let separator = self.value_separator.as_deref()?;
        let (actual, default) = key.split_once(separator)?;
        Some(
            self.properties
                .get(actual)
                .cloned()
                .unwrap_or_else(|| default.to_string()),
        )
    }

    /// Byte index of the suffix closing the placeholder opened at `start`
    fn placeholder_end(&self, buf: &str, start: usize) -> Option<usize> {
        let bytes = buf.as_bytes();
        let mut index = start + self.prefix.len();
        let mut nested = 0_usize;
        while index < bytes.len() {
            if bytes[index..].starts_with(self.suffix.as_bytes()) {
                if nested == 0 {
                    return Some(index);
                }
                nested -= 1;
                index += self.suffix.len();
            } else if bytes[index..].starts_with(self.simple_prefix.as_bytes()) {
                nested += 1;
                index += self.simple_prefix.len();
            } else {
                index += 1;
            }
        }
        None
    }
}

impl Default for PlaceholderResolver {
    fn default() -> Self {
        Self::new(&PlaceholderConfig::default())
    }
}

impl NameResolver for PlaceholderResolver {
    fn resolve(&self, value: &str) -> Option<String> {
        match self.resolve_placeholders(value) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                debug!(value = %value, error = %e, "Name left unresolved");
                None
            }
        }
    }
}

/// Opening bracket matching a bracket-style suffix, else the whole prefix
fn simple_prefix(prefix: &str, suffix: &str) -> String {
    let bracket = match suffix {
        "}" => "{",
        "]" => "[",
        ")" => "(",
        _ => return prefix.to_string(),
    };
    if prefix.ends_with(bracket) {
        bracket.to_string()
    } else {
        prefix.to_string()
    }
}
