//! Infrastructure constants
//!
//! Defaults shared by the configuration loader, logging and placeholder
//! resolution.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ioc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ioc";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "IOC";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "IOC_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum daily log files kept
pub const LOG_MAX_FILES: usize = 5;

/// File stem used when the configured log path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "ioc";

/// File extension used when the configured log path has none
pub const DEFAULT_LOG_FILE_EXTENSION: &str = "log";

// ============================================================================
// PLACEHOLDER CONSTANTS
// ============================================================================

/// Opening delimiter of a placeholder
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "${";

/// Closing delimiter of a placeholder
pub const DEFAULT_PLACEHOLDER_SUFFIX: &str = "}";

/// Separator between a placeholder key and its default value
pub const DEFAULT_PLACEHOLDER_VALUE_SEPARATOR: &str = ":";
