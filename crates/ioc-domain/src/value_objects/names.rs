//! Naming conventions
//!
//! A leading `&` asks for a producer itself rather than the object it yields.

use crate::constants::FACTORY_DEREFERENCE_PREFIX;

/// Whether `name` asks for the producer itself rather than its product
pub fn is_factory_dereference(name: &str) -> bool {
    name.starts_with(FACTORY_DEREFERENCE_PREFIX)
}

/// Strip every leading dereference prefix from `name`
///
/// ```
/// use ioc_domain::value_objects::names::transformed_name;
///
/// assert_eq!(transformed_name("&&pool"), "pool");
/// assert_eq!(transformed_name("pool"), "pool");
/// ```
pub fn transformed_name(name: &str) -> &str {
    let mut stripped = name;
    while let Some(rest) = stripped.strip_prefix(FACTORY_DEREFERENCE_PREFIX) {
        stripped = rest;
    }
    stripped
}
