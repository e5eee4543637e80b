//! Subscriber setup and isolation spans.

use config::ObservabilityConfig;
use errors::ObservabilityError;
use isolation_core::IsolationContext;
use std::str::FromStr;
use tracing::Span;
use tracing::field::Empty;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter for the configured level. `RUST_LOG` takes precedence when set.
///
/// The configured level must be a plain level name; anything else would be
/// read as a target directive and silence every other target.
pub fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
    let level = LevelFilter::from_str(&config.logging_level).map_err(|e| {
        ObservabilityError::InvalidFilter {
            directive: config.logging_level.clone(),
            reason: e.to_string(),
        }
    })?;

    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    Ok(EnvFilter::default().add_directive(level.into()))
}

/// Install the global fmt subscriber.
///
/// Returns `Ok(false)` without touching the global dispatcher when tracing is
/// disabled. Fails instead of panicking if a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<bool, ObservabilityError> {
    if !config.tracing_enabled {
        return Ok(false);
    }

    let filter = build_filter(config)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| ObservabilityError::SubscriberInit {
            reason: e.to_string(),
        })?;

    tracing::debug!(level = %config.logging_level, "Logging initialized");
    Ok(true)
}

/// Span for work done on behalf of `ctx`.
///
/// Field names are the context's log-field keys, unchanged. Identifiers the
/// context does not carry stay empty and are omitted from output.
pub fn isolation_span(operation: &str, ctx: &IsolationContext) -> Span {
    let span = tracing::info_span!(
        "isolation",
        operation = %operation,
        "isolationLevel" = Empty,
        "tenantId" = Empty,
        "organizationId" = Empty,
        "departmentId" = Empty,
        "userId" = Empty
    );

    for (key, value) in ctx.build_log_fields() {
        span.record(key.as_str(), value.as_str());
    }

    span
}
