//! # Configuration Structures
//!
//! All configuration structures:
//! - Use `serde` for serialization/deserialization
//! - Use `validator` for input validation
//! - Fill missing fields from their defaults

use isolation_core::{AccessResolver, SharingLevel};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level configuration.
///
/// ## Usage
/// ```rust,no_run
/// use config::Config;
///
/// let config = Config::default();
/// println!("Logging level: {}", config.observability.logging_level);
/// ```
///
/// ## Fields
/// - `sharing`: how data without a declared sharing level is shared
/// - `observability`: log level and subscriber formatting
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    #[validate(nested)]
    pub sharing: SharingConfig,

    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

/// Sharing defaults.
///
/// ## Fields
/// - `default_sharing_level`: level applied to items that declare none.
///   Unset means an item is shared at its owner's own level.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct SharingConfig {
    #[serde(default)]
    pub default_sharing_level: Option<SharingLevel>,
}

impl SharingConfig {
    /// Resolver applying these defaults.
    #[must_use]
    pub fn resolver(&self) -> AccessResolver {
        AccessResolver::new(self.default_sharing_level)
    }
}

/// Observability configuration.
///
/// ## Fields
/// - `tracing_enabled`: Install a tracing subscriber (default: true)
/// - `logging_level`: Log level (default: "info")
/// - `ansi`: Colored output (default: true)
/// - `with_target`: Print the event target module (default: true)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    #[serde(default = "default_observability_tracing_enabled")]
    pub tracing_enabled: bool,

    #[serde(default = "default_observability_logging_level")]
    #[validate(custom(function = "validate_logging_level"))]
    pub logging_level: String,

    #[serde(default = "default_true")]
    pub ansi: bool,

    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_observability_tracing_enabled() -> bool {
    true
}

fn default_observability_logging_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn validate_logging_level(value: &str) -> Result<(), validator::ValidationError> {
    match value {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("Invalid logging level")),
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing_enabled: default_observability_tracing_enabled(),
            logging_level: default_observability_logging_level(),
            ansi: default_true(),
            with_target: default_true(),
        }
    }
}
