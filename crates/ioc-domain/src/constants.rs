//! Domain layer constants
//!
//! Naming conventions shared by the registry and its collaborators.
//! Infrastructure-specific constants live in `ioc_infrastructure::constants`.

// ============================================================================
// NAMING CONSTANTS
// ============================================================================

/// Prefix that dereferences a producer name to the producer itself
/// instead of the object it produces (`&myProducer`)
pub const FACTORY_DEREFERENCE_PREFIX: &str = "&";

// ============================================================================
// CAPACITY HINTS
// ============================================================================

/// Initial capacity of the complete-instance table
pub const SINGLETON_TABLE_CAPACITY: usize = 256;

/// Initial capacity of the early-reference and derived-object tables
pub const EARLY_TABLE_CAPACITY: usize = 16;

/// Initial capacity of the dependency edge maps
pub const DEPENDENCY_MAP_CAPACITY: usize = 64;
