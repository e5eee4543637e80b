//! # Environment Variable Loader
//!
//! Loads configuration from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `ISO_*`: Isolation engine settings
//! - `OB_*`: Observability settings

use crate::config::{Config, ObservabilityConfig, SharingConfig};
use std::env;

/// Load configuration from environment variables.
///
/// Unset or unparsable variables fall back to their defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = load_from_env()?;
///     println!("Logging level: {}", config.observability.logging_level);
///     Ok(())
/// }
/// ```
///
/// ## Environment Variables
/// ### Isolation Settings (`ISO_*`)
/// - `ISO_DEFAULT_SHARING_LEVEL`: platform/tenant/organization/department/user
///   (default: unset, items are shared at their owner's level)
///
/// ### Observability Settings (`OB_*`)
/// - `OB_TRACING_ENABLED`: Install a subscriber (true/false, default: true)
/// - `OB_LOGGING_LEVEL`: Logging level (trace/debug/info/warn/error, default:
///   "info")
/// - `OB_ANSI`: Colored output (true/false, default: true)
/// - `OB_WITH_TARGET`: Print event targets (true/false, default: true)
pub fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let config = Config {
        sharing: load_sharing_from_env()?,
        observability: load_observability_from_env()?,
    };

    Ok(config)
}

fn load_sharing_from_env() -> Result<SharingConfig, Box<dyn std::error::Error>> {
    Ok(SharingConfig {
        default_sharing_level: parse_env("ISO_DEFAULT_SHARING_LEVEL").ok(),
    })
}

fn load_observability_from_env() -> Result<ObservabilityConfig, Box<dyn std::error::Error>> {
    let defaults = ObservabilityConfig::default();
    Ok(ObservabilityConfig {
        tracing_enabled: parse_env("OB_TRACING_ENABLED").unwrap_or(defaults.tracing_enabled),
        logging_level: env::var("OB_LOGGING_LEVEL").unwrap_or(defaults.logging_level),
        ansi: parse_env("OB_ANSI").unwrap_or(defaults.ansi),
        with_target: parse_env("OB_WITH_TARGET").unwrap_or(defaults.with_target),
    })
}

fn parse_env<T>(key: &str) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(s) => s.parse::<T>().map_err(|e| {
            tracing::warn!(key, value = %s, "Ignoring unparsable environment variable");
            Box::new(e) as Box<dyn std::error::Error>
        }),
        Err(e) => Err(Box::new(e) as Box<dyn std::error::Error>),
    }
}
