//! Disposal handle port

use crate::error::Result;

/// Teardown operation registered for a singleton name
///
/// The handle may be a different object from the cached instance. Failures
/// are logged by the destruction orchestrator and never re-thrown to the
/// caller driving destruction.
///
/// Closures implement this trait directly:
///
/// ```
/// use ioc_domain::ports::Disposable;
///
/// let handle = || -> ioc_domain::Result<()> { Ok(()) };
/// assert!(handle.dispose().is_ok());
/// ```
pub trait Disposable: Send + Sync {
    /// Release the resources held for the singleton
    fn dispose(&self) -> Result<()>;
}

impl<F> Disposable for F
where
    F: Fn() -> Result<()> + Send + Sync,
{
    fn dispose(&self) -> Result<()> {
        self()
    }
}
