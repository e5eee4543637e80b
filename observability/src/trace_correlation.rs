//! # Trace Correlation
//!
//! Correlates work across service hops. Each [`TraceContext`] carries the
//! trace and span ids plus the isolation log fields of the context it runs
//! under, so every hop logs the same tenant/organization/department/user
//! fields.

use chrono::{DateTime, Utc};
use isolation_core::IsolationContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceContext {
    /// Unique trace ID that follows the request across all services
    pub trace_id: String,
    /// Span ID for the current operation
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub service_name: String,
    pub started_at: DateTime<Utc>,
    /// Isolation log fields, keys unchanged
    pub isolation: BTreeMap<String, String>,
}

impl TraceContext {
    pub fn new(service_name: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            span_id: Uuid::new_v4().to_string(),
            parent_span_id: None,
            service_name: service_name.to_string(),
            started_at: Utc::now(),
            isolation: BTreeMap::new(),
        }
    }

    pub fn with_parent(parent: &TraceContext, service_name: &str) -> Self {
        Self {
            trace_id: parent.trace_id.clone(),
            span_id: Uuid::new_v4().to_string(),
            parent_span_id: Some(parent.span_id.clone()),
            service_name: service_name.to_string(),
            started_at: Utc::now(),
            isolation: parent.isolation.clone(),
        }
    }

    /// Attach `ctx`'s log fields, replacing any previously attached context.
    pub fn with_isolation(mut self, ctx: &IsolationContext) -> Self {
        self.isolation = ctx.build_log_fields();
        self
    }

    /// Flat field map for a structured log line: trace ids plus the isolation
    /// fields.
    pub fn correlation_fields(&self) -> BTreeMap<String, String> {
        let mut fields = self.isolation.clone();
        fields.insert("traceId".to_string(), self.trace_id.clone());
        fields.insert("spanId".to_string(), self.span_id.clone());
        if let Some(parent) = &self.parent_span_id {
            fields.insert("parentSpanId".to_string(), parent.clone());
        }
        fields.insert("service".to_string(), self.service_name.clone());
        fields
    }
}
