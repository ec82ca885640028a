//! Canonical name resolution
//!
//! Maps alternate names (aliases) onto the one canonical name they stand
//! for. Aliases may chain (`c → b → a`), but a chain may never loop back on
//! itself; every write checks for that before it lands.

use ioc_domain::error::{Error, Result};
use ioc_domain::ports::NameResolver;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Alias registry
///
/// Entries are stored as `alias → name`; `name` may itself be an alias.
/// Writes are serialized by the map's write lock, reads share it.
#[derive(Debug)]
pub struct AliasRegistry {
    aliases: RwLock<BTreeMap<String, String>>,
    allow_overriding: bool,
}

impl AliasRegistry {
    /// Create an empty registry that permits alias overriding
    pub fn new() -> Self {
        Self::with_overriding(true)
    }

    /// Create an empty registry with an explicit overriding policy
    pub fn with_overriding(allow_overriding: bool) -> Self {
        Self {
            aliases: RwLock::new(BTreeMap::new()),
            allow_overriding,
        }
    }

    /// Whether an alias may be repointed at a different name
    pub fn allows_overriding(&self) -> bool {
        self.allow_overriding
    }

    /// Register `alias` for `name`
    ///
    /// Registering a name as its own alias removes any earlier mapping for
    /// that alias string.
    pub fn register_alias(&self, name: &str, alias: &str) -> Result<()> {
        validate_non_empty(name, "name")?;
        validate_non_empty(alias, "alias")?;

        let mut aliases = self.aliases.write();
        if alias == name {
            if aliases.remove(alias).is_some() {
                debug!(alias = %alias, "Alias cleared by self-registration");
            }
            return Ok(());
        }

        if let Some(registered) = aliases.get(alias) {
            if registered == name {
                return Ok(());
            }
            if !self.allow_overriding {
                return Err(Error::conflict(format!(
                    "Cannot register alias '{}' for name '{}': It is already registered for name '{}'",
                    alias, name, registered
                )));
            }
            warn!(
                alias = %alias,
                previous = %registered,
                name = %name,
                "Overriding alias registration"
            );
        }

        check_for_alias_circle(&aliases, name, alias)?;
        aliases.insert(alias.to_string(), name.to_string());
        debug!(alias = %alias, name = %name, "Alias registered");
        Ok(())
    }

    /// Remove a registered alias
    pub fn remove_alias(&self, alias: &str) -> Result<()> {
        match self.aliases.write().remove(alias) {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("alias '{}'", alias))),
        }
    }

    /// Whether `name` is registered as an alias
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.read().contains_key(name)
    }

    /// Whether `alias` resolves, directly or through other aliases, to `name`
    pub fn has_alias(&self, name: &str, alias: &str) -> bool {
        has_alias(&self.aliases.read(), name, alias)
    }

    /// Every alias that resolves to `name`, including chained ones
    pub fn aliases_of(&self, name: &str) -> Vec<String> {
        let aliases = self.aliases.read();
        let mut result = Vec::new();
        let mut seen = BTreeSet::new();
        collect_aliases(&aliases, name, &mut result, &mut seen);
        result
    }

    /// Follow alias links from `name` until a name with no mapping is reached
    pub fn canonical_name(&self, name: &str) -> String {
        let aliases = self.aliases.read();
        let mut canonical = name;
        while let Some(resolved) = aliases.get(canonical) {
            canonical = resolved;
        }
        canonical.to_string()
    }

    /// Number of registered aliases
    pub fn alias_count(&self) -> usize {
        self.aliases.read().len()
    }

    /// Apply `resolver` to every alias and target name
    ///
    /// The pass is atomic: it works on a copy of the map and only commits
    /// when every entry resolved without a conflict or a cycle.
    pub fn resolve_aliases(&self, resolver: &dyn NameResolver) -> Result<()> {
        let mut aliases = self.aliases.write();
        let snapshot = aliases.clone();
        let mut working = aliases.clone();

        for (alias, registered) in &snapshot {
            let (resolved_alias, resolved_name) =
                match (resolver.resolve(alias), resolver.resolve(registered)) {
                    (Some(a), Some(n)) if a != n => (a, n),
                    _ => {
                        working.remove(alias);
                        continue;
                    }
                };

            if resolved_alias != *alias {
                if let Some(existing) = working.get(&resolved_alias) {
                    if *existing == resolved_name {
                        // Points at an existing alias already
                        working.remove(alias);
                        continue;
                    }
                    if !self.allow_overriding {
                        return Err(Error::conflict(format!(
                            "Cannot register resolved alias '{}' (original: '{}') for name '{}': \
                             It is already registered for name '{}'",
                            resolved_alias, alias, resolved_name, existing
                        )));
                    }
                    warn!(
                        alias = %resolved_alias,
                        previous = %existing,
                        name = %resolved_name,
                        "Overriding alias during placeholder resolution"
                    );
                }
                working.remove(alias);
                check_for_alias_circle(&working, &resolved_name, &resolved_alias)?;
                working.insert(resolved_alias, resolved_name);
            } else if *registered != resolved_name {
                check_for_alias_circle(&working, &resolved_name, alias)?;
                working.insert(alias.clone(), resolved_name);
            }
        }

        *aliases = working;
        Ok(())
    }
}

impl Default for AliasRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::configuration(format!("'{}' must not be empty", what)));
    }
    Ok(())
}

fn check_for_alias_circle(aliases: &BTreeMap<String, String>, name: &str, alias: &str) -> Result<()> {
    if has_alias(aliases, alias, name) {
        return Err(Error::circular_reference(name, alias));
    }
    Ok(())
}

/// Search the aliases of `name` (transitively) for `alias`
fn has_alias(aliases: &BTreeMap<String, String>, name: &str, alias: &str) -> bool {
    let mut pending = vec![name];
    let mut seen = BTreeSet::new();
    while let Some(current) = pending.pop() {
        if !seen.insert(current) {
            continue;
        }
        for (registered_alias, registered_name) in aliases {
            if registered_name == current {
                if registered_alias == alias {
                    return true;
                }
                pending.push(registered_alias);
            }
        }
    }
    false
}

fn collect_aliases<'a>(
    aliases: &'a BTreeMap<String, String>,
    name: &str,
    result: &mut Vec<String>,
    seen: &mut BTreeSet<&'a str>,
) {
    for (alias, registered) in aliases {
        if registered == name && seen.insert(alias) {
            result.push(alias.clone());
            collect_aliases(aliases, alias, result, seen);
        }
    }
}
