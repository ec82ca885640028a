//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error source carried by the variants that wrap foreign failures
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the singleton registry
#[derive(Error, Debug)]
pub enum Error {
    /// Duplicate registration where overriding is not permitted
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting registration
        message: String,
    },

    /// Alias registration would close a cycle of aliases
    #[error(
        "Cannot register alias '{alias}' for name '{name}': Circular reference - \
         '{name}' is a direct or indirect alias for '{alias}' already"
    )]
    CircularReference {
        /// The name the alias was meant to point at
        name: String,
        /// The rejected alias
        alias: String,
    },

    /// Operation on an unregistered name or alias
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Reentrant construction attempt, or a producer with no value mid-construction
    #[error("Singleton '{name}' is currently in creation: {message}")]
    CurrentlyInCreation {
        /// Canonical name of the singleton
        name: String,
        /// Extra detail about the reentrant request
        message: String,
    },

    /// Creation attempted while the registry is destroying its singletons
    #[error(
        "Singleton '{name}' creation not allowed while singletons of this registry are in \
         destruction (do not request a singleton from a disposal handle)"
    )]
    CreationNotAllowed {
        /// Name whose creation was rejected
        name: String,
    },

    /// A production callback or producer failed
    #[error("Error creating singleton '{name}': {message}{}", related_suffix(.related_causes))]
    CreationFailed {
        /// Canonical name of the singleton
        name: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
        /// Failures suppressed during the same creation window
        related_causes: Vec<Error>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxedSource>,
    },

    /// Generic error from external sources
    #[error("Generic error: {0}")]
    Generic(#[from] BoxedSource),
}

fn related_suffix(related: &[Error]) -> String {
    match related.len() {
        0 => String::new(),
        1 => " (1 related cause)".to_string(),
        n => format!(" ({} related causes)", n),
    }
}

// Registry error creation methods
impl Error {
    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a circular alias reference error
    pub fn circular_reference<N: Into<String>, A: Into<String>>(name: N, alias: A) -> Self {
        Self::CircularReference {
            name: name.into(),
            alias: alias.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a currently-in-creation error with the default message
    pub fn currently_in_creation<S: Into<String>>(name: S) -> Self {
        Self::currently_in_creation_with_message(
            name,
            "Requested singleton is currently in creation: Is there an unresolvable circular reference?",
        )
    }

    /// Create a currently-in-creation error with a custom message
    pub fn currently_in_creation_with_message<S: Into<String>, M: Into<String>>(
        name: S,
        message: M,
    ) -> Self {
        Self::CurrentlyInCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a creation-not-allowed error
    pub fn creation_not_allowed<S: Into<String>>(name: S) -> Self {
        Self::CreationNotAllowed { name: name.into() }
    }

    /// Create a creation failure without a source
    pub fn creation_failed<S: Into<String>, M: Into<String>>(name: S, message: M) -> Self {
        Self::CreationFailed {
            name: name.into(),
            message: message.into(),
            source: None,
            related_causes: Vec::new(),
        }
    }

    /// Create a creation failure wrapping a source error
    pub fn creation_failed_with_source<
        S: Into<String>,
        M: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        name: S,
        message: M,
        source: E,
    ) -> Self {
        Self::CreationFailed {
            name: name.into(),
            message: message.into(),
            source: Some(Box::new(source)),
            related_causes: Vec::new(),
        }
    }

    /// Create a generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into().into())
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection helpers
impl Error {
    /// Whether this error signals a reentrant request for a name under construction
    pub fn is_currently_in_creation(&self) -> bool {
        matches!(self, Self::CurrentlyInCreation { .. })
    }

    /// Whether this error signals creation during global destruction
    pub fn is_creation_not_allowed(&self) -> bool {
        matches!(self, Self::CreationNotAllowed { .. })
    }

    /// Whether this error is a wrapped creation failure
    pub fn is_creation_failed(&self) -> bool {
        matches!(self, Self::CreationFailed { .. })
    }

    /// Related causes attached to a creation failure, empty for other variants
    pub fn related_causes(&self) -> &[Error] {
        match self {
            Self::CreationFailed { related_causes, .. } => related_causes,
            _ => &[],
        }
    }

    /// Attach suppressed failures as related causes
    ///
    /// Only `CreationFailed` carries related causes; other variants are
    /// returned unchanged.
    pub fn with_related_causes<I>(mut self, causes: I) -> Self
    where
        I: IntoIterator<Item = Error>,
    {
        if let Self::CreationFailed { related_causes, .. } = &mut self {
            related_causes.extend(causes);
        }
        self
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::generic(s)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::generic(s)
    }
}
