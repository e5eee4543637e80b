//! # Hierarchy Validator
//!
//! Turns the flat, four-optional-identifier form of a context into a
//! validated [`IsolationContext`].
//!
//! ## Rules
//! - every present identifier passes its tier's identifier validation
//! - a department requires an organization
//! - an organization requires a tenant
//! - a user requires a tenant
//! - a user is anchored directly under its tenant, never under an
//!   organization or department
//!
//! The first failing rule is reported together with the offending value.
//!
//! The last rule makes the flat form stricter than field-by-field parent
//! checks: a user sitting inside an organization has no context to map to.

use crate::context::{IsolationContext, Scope};
use crate::identifiers::{DepartmentId, OrganizationId, TenantId, UserId};
use errors::{HierarchyRule, IsolationError};
use serde::{Deserialize, Serialize};

/// Flat wire form of an [`IsolationContext`], as found in request headers or
/// ownership columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsolationContextParts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Validate `parts` and build the context they describe.
pub fn validate_hierarchy(parts: IsolationContextParts) -> Result<IsolationContext, IsolationError> {
    let result = build_scope(parts).map(IsolationContext::from_scope);
    if let Err(err) = &result {
        tracing::debug!(rule = %err.rule(), "Rejected isolation context");
    }
    result
}

fn build_scope(parts: IsolationContextParts) -> Result<Scope, IsolationError> {
    let tenant = parts.tenant_id.map(TenantId::new).transpose()?;
    let organization = parts.organization_id.map(OrganizationId::new).transpose()?;
    let department = parts.department_id.map(DepartmentId::new).transpose()?;
    let user = parts.user_id.map(UserId::new).transpose()?;

    match (tenant, organization, department, user) {
        (_, None, Some(department), _) => Err(IsolationError::hierarchy(
            HierarchyRule::DepartmentRequiresOrganization,
            department.into_inner(),
        )),
        (None, Some(organization), _, _) => Err(IsolationError::hierarchy(
            HierarchyRule::OrganizationRequiresTenant,
            organization.into_inner(),
        )),
        (Some(_), Some(_), _, Some(user)) => Err(IsolationError::hierarchy(
            HierarchyRule::UserExcludesOrganization,
            user.into_inner(),
        )),
        (None, None, None, Some(user)) => Err(IsolationError::hierarchy(
            HierarchyRule::UserRequiresTenant,
            user.into_inner(),
        )),
        (None, None, None, None) => Ok(Scope::Platform),
        (Some(tenant), None, None, None) => Ok(Scope::Tenant { tenant }),
        (Some(tenant), Some(organization), None, None) => Ok(Scope::Organization {
            tenant,
            organization,
        }),
        (Some(tenant), Some(organization), Some(department), None) => Ok(Scope::Department {
            tenant,
            organization,
            department,
        }),
        (Some(tenant), None, None, Some(user)) => Ok(Scope::User { tenant, user }),
    }
}

impl TryFrom<IsolationContextParts> for IsolationContext {
    type Error = IsolationError;

    fn try_from(parts: IsolationContextParts) -> Result<Self, Self::Error> {
        validate_hierarchy(parts)
    }
}
