//! # Isolation Core
//!
//! Hierarchical isolation contexts for multi-tenant data.
//!
//! This crate provides:
//! - Typed identifiers for the tenant, organization, department and user tiers
//! - [`IsolationContext`], the validated position of a caller or a record in
//!   the platform → tenant → organization → department → user hierarchy
//! - Deterministic cache keys, log fields and query predicates per context
//! - The sharing resolver deciding cross-context access
//!
//! Everything here is synchronous and free of shared mutable state; contexts
//! can be sent across threads and request handlers without locking.

pub mod context;
pub mod identifiers;
pub mod levels;
pub mod sharing;
pub mod traits;
pub mod validator;

// Re-export commonly used types for convenience
pub use context::IsolationContext;
pub use errors::{HierarchyRule, IsolationError};
pub use identifiers::{DepartmentId, MAX_IDENTIFIER_LENGTH, OrganizationId, TenantId, UserId};
pub use levels::{IsolationLevel, SharingLevel};
pub use sharing::{AccessResolver, can_access, can_share_with};
pub use traits::Isolated;
pub use validator::{IsolationContextParts, validate_hierarchy};
