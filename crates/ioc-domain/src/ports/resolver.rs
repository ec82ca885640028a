//! Name resolver port

/// Pure string transformation applied to alias and canonical names
///
/// Returning `None` signals that the value cannot be resolved; the alias
/// registry drops entries it cannot resolve.
pub trait NameResolver: Send + Sync {
    /// Resolve placeholders in `value`
    fn resolve(&self, value: &str) -> Option<String>;
}

impl<F> NameResolver for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve(&self, value: &str) -> Option<String> {
        self(value)
    }
}
