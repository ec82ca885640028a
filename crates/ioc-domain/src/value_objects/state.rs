//! Singleton lifecycle state

use std::fmt;

/// Observable state of a canonical name in the singleton cache
///
/// ```text
/// Absent ──────────────────────────► InCreation ──► Complete
///    │                                    ▲
///    └──► EarlyReferenceAvailable ────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SingletonState {
    /// Nothing is known about the name
    #[default]
    Absent,
    /// An early producer is registered but construction has not started
    EarlyReferenceAvailable,
    /// A production callback for the name is executing
    InCreation,
    /// The final instance (possibly "no value") is cached
    Complete,
}

impl SingletonState {
    /// Whether a final instance is cached
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether construction is under way
    pub fn is_in_creation(self) -> bool {
        matches!(self, Self::InCreation)
    }
}

impl fmt::Display for SingletonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Absent => "absent",
            Self::EarlyReferenceAvailable => "early-reference-available",
            Self::InCreation => "in-creation",
            Self::Complete => "complete",
        };
        f.write_str(label)
    }
}
