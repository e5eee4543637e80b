//! # Isolation Context
//!
//! Where in the platform → tenant → organization → department → user
//! hierarchy a caller or a piece of data lives.
//!
//! The context is a tagged variant rather than four independent optional
//! identifiers, so an organization without a tenant or a department without
//! an organization cannot be represented. The flat, optional-field form only
//! exists as [`IsolationContextParts`](crate::validator::IsolationContextParts)
//! and has to go through the hierarchy validator to become a context.
//!
//! Contexts are immutable once built. They hand out three deterministic
//! derivations consumed by the cache, logging and persistence layers:
//! [`IsolationContext::build_cache_key`], [`IsolationContext::build_log_fields`]
//! and [`IsolationContext::build_query_predicate`].

use crate::identifiers::{DepartmentId, OrganizationId, TenantId, UserId};
use crate::levels::IsolationLevel;
use crate::validator::IsolationContextParts;
use errors::{HierarchyRule, IsolationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CACHE_KEY_ROOT: &str = "cache";
const LEVEL_LOG_FIELD: &str = "isolationLevel";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Scope {
    Platform,
    Tenant {
        tenant: TenantId,
    },
    Organization {
        tenant: TenantId,
        organization: OrganizationId,
    },
    Department {
        tenant: TenantId,
        organization: OrganizationId,
        department: DepartmentId,
    },
    User {
        tenant: TenantId,
        user: UserId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IsolationContextParts", into = "IsolationContextParts")]
pub struct IsolationContext {
    scope: Scope,
}

impl IsolationContext {
    pub(crate) fn from_scope(scope: Scope) -> Self {
        Self { scope }
    }

    /// Context with no identifiers. Platform callers can read everything.
    #[must_use]
    pub fn platform() -> Self {
        Self::from_scope(Scope::Platform)
    }

    #[must_use]
    pub fn tenant(tenant: TenantId) -> Self {
        Self::from_scope(Scope::Tenant { tenant })
    }

    #[must_use]
    pub fn organization(tenant: TenantId, organization: OrganizationId) -> Self {
        Self::from_scope(Scope::Organization {
            tenant,
            organization,
        })
    }

    #[must_use]
    pub fn department(
        tenant: TenantId,
        organization: OrganizationId,
        department: DepartmentId,
    ) -> Self {
        Self::from_scope(Scope::Department {
            tenant,
            organization,
            department,
        })
    }

    /// User-level context.
    ///
    /// The tenant is optional in the signature because callers often hold a
    /// user id before the tenant is resolved, but a user context is always
    /// anchored under a tenant: passing `None` fails with
    /// `user-requires-tenant`.
    pub fn user(user: UserId, tenant: Option<TenantId>) -> Result<Self, IsolationError> {
        match tenant {
            Some(tenant) => Ok(Self::from_scope(Scope::User { tenant, user })),
            None => {
                tracing::debug!(user_id = %user, "Rejected user context without tenant");
                Err(IsolationError::hierarchy(
                    HierarchyRule::UserRequiresTenant,
                    user.into_inner(),
                ))
            }
        }
    }

    /// The tier this context is anchored at.
    ///
    /// A department wins over an organization, and a user context only ever
    /// sits directly under its tenant. Recomputed on every call; it is a
    /// single match.
    #[must_use]
    pub fn level(&self) -> IsolationLevel {
        match &self.scope {
            Scope::Platform => IsolationLevel::Platform,
            Scope::Tenant { .. } => IsolationLevel::Tenant,
            Scope::Organization { .. } => IsolationLevel::Organization,
            Scope::Department { .. } => IsolationLevel::Department,
            Scope::User { .. } => IsolationLevel::User,
        }
    }

    #[must_use]
    pub fn is_platform(&self) -> bool {
        matches!(self.scope, Scope::Platform)
    }

    #[must_use]
    pub fn tenant_id(&self) -> Option<&TenantId> {
        match &self.scope {
            Scope::Platform => None,
            Scope::Tenant { tenant }
            | Scope::Organization { tenant, .. }
            | Scope::Department { tenant, .. }
            | Scope::User { tenant, .. } => Some(tenant),
        }
    }

    #[must_use]
    pub fn organization_id(&self) -> Option<&OrganizationId> {
        match &self.scope {
            Scope::Organization { organization, .. } | Scope::Department { organization, .. } => {
                Some(organization)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn department_id(&self) -> Option<&DepartmentId> {
        match &self.scope {
            Scope::Department { department, .. } => Some(department),
            _ => None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        match &self.scope {
            Scope::User { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Raw identifier stored for `level`, if this context carries one.
    #[must_use]
    pub fn identifier_at(&self, level: IsolationLevel) -> Option<&str> {
        match level {
            IsolationLevel::Platform => None,
            IsolationLevel::Tenant => self.tenant_id().map(TenantId::as_str),
            IsolationLevel::Organization => self.organization_id().map(OrganizationId::as_str),
            IsolationLevel::Department => self.department_id().map(DepartmentId::as_str),
            IsolationLevel::User => self.user_id().map(UserId::as_str),
        }
    }

    /// Present tiers from the context's own level down to the tenant, most
    /// specific first. Empty for the platform.
    ///
    /// A department context yields department, organization and tenant; a
    /// user context yields user and tenant.
    pub fn lineage(&self) -> impl Iterator<Item = (IsolationLevel, &str)> + '_ {
        let own = self.level();
        IsolationLevel::ALL
            .into_iter()
            .rev()
            .filter(move |level| *level != IsolationLevel::Platform && own.is_at_least(*level))
            .filter_map(move |level| self.identifier_at(level).map(|id| (level, id)))
    }

    /// Colon-delimited cache key scoped to this context.
    ///
    /// ```text
    /// cache:platform:{namespace}:{key}
    /// cache:tenant:{t}:{namespace}:{key}
    /// cache:tenant:{t}:org:{o}:{namespace}:{key}
    /// cache:tenant:{t}:org:{o}:dept:{d}:{namespace}:{key}
    /// cache:tenant:{t}:user:{u}:{namespace}:{key}
    /// ```
    ///
    /// The result is opaque to callers. Identifiers never contain `:`, so two
    /// contexts that differ in any identifier never share a key.
    #[must_use]
    pub fn build_cache_key(&self, namespace: &str, key: &str) -> String {
        let mut segments = vec![CACHE_KEY_ROOT];
        if self.is_platform() {
            segments.push(IsolationLevel::Platform.cache_segment());
        }

        let lineage: Vec<_> = self.lineage().collect();
        for (level, id) in lineage.into_iter().rev() {
            segments.push(level.cache_segment());
            segments.push(id);
        }

        segments.push(namespace);
        segments.push(key);
        segments.join(":")
    }

    /// Correlation fields for structured logs.
    ///
    /// Always contains `isolationLevel`; identifier fields are only present
    /// when the context carries them.
    #[must_use]
    pub fn build_log_fields(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert(LEVEL_LOG_FIELD.to_string(), self.level().to_string());
        for (level, id) in self.lineage() {
            if let Some(field) = level.id_field() {
                fields.insert(field.to_string(), id.to_string());
            }
        }
        fields
    }

    /// Equality conditions scoping a data-store query to this context.
    ///
    /// One clause per tier in [`lineage`](Self::lineage): a department
    /// context filters on department, organization and tenant together. The
    /// platform yields no clauses. With an alias, keys read `{alias}.{field}`.
    /// Callers AND every clause together.
    #[must_use]
    pub fn build_query_predicate(&self, alias: Option<&str>) -> BTreeMap<String, String> {
        self.lineage()
            .filter_map(|(level, id)| level.id_field().map(|field| (field, id)))
            .map(|(field, id)| {
                let column = match alias {
                    Some(alias) => format!("{alias}.{field}"),
                    None => field.to_string(),
                };
                (column, id.to_string())
            })
            .collect()
    }
}

impl From<IsolationContext> for IsolationContextParts {
    fn from(ctx: IsolationContext) -> Self {
        match ctx.scope {
            Scope::Platform => IsolationContextParts::default(),
            Scope::Tenant { tenant } => IsolationContextParts {
                tenant_id: Some(tenant.into_inner()),
                ..IsolationContextParts::default()
            },
            Scope::Organization {
                tenant,
                organization,
            } => IsolationContextParts {
                tenant_id: Some(tenant.into_inner()),
                organization_id: Some(organization.into_inner()),
                ..IsolationContextParts::default()
            },
            Scope::Department {
                tenant,
                organization,
                department,
            } => IsolationContextParts {
                tenant_id: Some(tenant.into_inner()),
                organization_id: Some(organization.into_inner()),
                department_id: Some(department.into_inner()),
                user_id: None,
            },
            Scope::User { tenant, user } => IsolationContextParts {
                tenant_id: Some(tenant.into_inner()),
                user_id: Some(user.into_inner()),
                ..IsolationContextParts::default()
            },
        }
    }
}
