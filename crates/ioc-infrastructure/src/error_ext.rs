//! Error extension utilities
//!
//! Context extension methods that turn foreign errors into the domain error.

use ioc_domain::error::{Error, Result};
use std::fmt;

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```
/// use ioc_infrastructure::error_ext::ErrorContext;
///
/// let parsed: ioc_domain::Result<u32> = "12".parse::<u32>().config_context("Invalid capacity");
/// assert_eq!(parsed.ok(), Some(12));
///
/// let missing = std::fs::read_to_string("/definitely/not/here.toml")
///     .io_context("Failed to read config file");
/// assert!(missing.is_err());
/// ```
pub trait ErrorContext<T> {
    /// Add context to a Result, converting the error to the domain Error type
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context with lazy evaluation for expensive context creation
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;

    /// Add context for I/O operations
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized;

    /// Add context for configuration operations
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized;

    /// Report a failure inside a production callback for `name`
    fn creation_context<N, C>(self, name: N, context: C) -> Result<T>
    where
        N: Into<String>,
        C: fmt::Display,
        Self: Sized;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| {
            let message = format!("{}: {}", context, err);
            Error::infrastructure_with_source(message, err)
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let message = format!("{}: {}", f(), err);
            Error::infrastructure_with_source(message, err)
        })
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized,
    {
        self.map_err(|err| {
            let message = format!("{}: {}", context, err);
            Error::io_with_source(message, err)
        })
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        Self: Sized,
    {
        self.map_err(|err| {
            let message = format!("{}: {}", context, err);
            Error::configuration_with_source(message, err)
        })
    }

    fn creation_context<N, C>(self, name: N, context: C) -> Result<T>
    where
        N: Into<String>,
        C: fmt::Display,
        Self: Sized,
    {
        self.map_err(|err| Error::creation_failed_with_source(name, context.to_string(), err))
    }
}
