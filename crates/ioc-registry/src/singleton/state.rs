//! Per-name singleton state machine

use ioc_domain::error::Result;
use ioc_domain::value_objects::{MaybeInstance, SingletonState};
use std::sync::Arc;

/// Callback that yields an early reference to a singleton under construction
pub type EarlyProducer = Arc<dyn Fn() -> Result<MaybeInstance> + Send + Sync>;

/// Early reference attached to a name that is in creation
pub(crate) enum EarlyReference {
    /// Nothing can be exposed yet
    Unavailable,
    /// A producer is registered but has not been asked yet
    Pending(EarlyProducer),
    /// The producer ran; its result is handed to every later request
    Exposed(MaybeInstance),
}

/// State of one canonical name
pub(crate) enum Slot {
    /// Early producer registered ahead of construction
    Early(EarlyProducer),
    /// Production callback running on some caller's stack
    InCreation(EarlyReference),
    /// Final instance cached
    Complete(MaybeInstance),
}

impl Slot {
    pub(crate) fn state(&self) -> SingletonState {
        match self {
            Self::Early(_) => SingletonState::EarlyReferenceAvailable,
            Self::InCreation(_) => SingletonState::InCreation,
            Self::Complete(_) => SingletonState::Complete,
        }
    }

    /// Leave creation without a final instance
    ///
    /// A producer that was never asked survives for the next attempt; an
    /// exposed early reference does not.
    pub(crate) fn abort_creation(self) -> Option<Slot> {
        match self {
            Self::InCreation(EarlyReference::Pending(producer)) => Some(Self::Early(producer)),
            Self::InCreation(_) => None,
            other => Some(other),
        }
    }
}
