//! # Observability
//!
//! Logging bootstrap and isolation-aware correlation:
//! - `tracing` subscriber installation driven by [`config::ObservabilityConfig`]
//! - Spans carrying an isolation context's log fields
//! - Trace correlation ids propagated across service hops

pub mod logging;
pub mod trace_correlation;

pub use logging::{build_filter, init_logging, isolation_span};
pub use trace_correlation::TraceContext;
