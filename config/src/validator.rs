//! # Configuration Validation
//!
//! ## Validation Rules
//! - `observability.logging_level`: must be "trace", "debug", "info", "warn"
//!   or "error"
//! - `sharing.default_sharing_level`: enforced by deserialization, any of the
//!   five sharing levels or unset

use crate::config::Config;
use validator::Validate;

/// Validate a loaded configuration.
pub fn validate(config: &Config) -> Result<(), validator::ValidationErrors> {
    config.validate()
}
