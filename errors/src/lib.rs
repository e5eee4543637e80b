//! # Isolation Errors
//!
//! Error types shared by every crate of the isolation workspace.
//!
//! - Uses `thiserror` for structured error definitions
//! - Every variant carries named fields so messages stay self-describing

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// The construction rule an identifier chain failed.
///
/// Rendered in kebab-case (`organization-requires-tenant`) so the rule can be
/// matched on in logs and error payloads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HierarchyRule {
    OrganizationRequiresTenant,
    DepartmentRequiresOrganization,
    UserRequiresTenant,
    /// A user-level context is anchored directly under its tenant and never
    /// carries an organization or department.
    UserExcludesOrganization,
    InvalidTenantId,
    InvalidOrganizationId,
    InvalidDepartmentId,
    InvalidUserId,
}

impl HierarchyRule {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Isolation engine errors.
///
/// Raised only while building an isolation context. Not retryable: it means
/// the caller asked for an identifier combination that cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolationError {
    #[error("Hierarchy violation: {rule} (offending value: '{value}')")]
    HierarchyViolation { rule: HierarchyRule, value: String },
}

impl IsolationError {
    pub fn hierarchy(rule: HierarchyRule, value: impl Into<String>) -> Self {
        IsolationError::HierarchyViolation {
            rule,
            value: value.into(),
        }
    }

    /// The rule this error reports.
    #[must_use]
    pub fn rule(&self) -> HierarchyRule {
        match self {
            IsolationError::HierarchyViolation { rule, .. } => *rule,
        }
    }
}

/// Logging bootstrap errors
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter directive {directive}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to install tracing subscriber: {reason}")]
    SubscriberInit { reason: String },
}
