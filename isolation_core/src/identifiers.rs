//! Identifier newtypes, one per hierarchy tier.
//!
//! Each tier gets its own type so a department id can never be passed where an
//! organization id is expected. All four share the same validation rules.

use errors::{HierarchyRule, IsolationError};
use serde::{Deserialize, Serialize};

/// Longest identifier accepted at any tier, in bytes.
pub const MAX_IDENTIFIER_LENGTH: usize = 100;

/// `:` is the cache-key delimiter, so it is rejected along with whitespace and
/// control characters.
fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_IDENTIFIER_LENGTH
        && !id
            .chars()
            .any(|c| c == ':' || c.is_whitespace() || c.is_control())
}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident, $rule:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Result<Self, IsolationError> {
                let id = id.into();
                if is_valid_identifier(&id) {
                    Ok(Self(id))
                } else {
                    Err(IsolationError::hierarchy($rule, id))
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IsolationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IsolationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_identifier!(
    /// Tenant identifier, the root of every non-platform context.
    TenantId,
    HierarchyRule::InvalidTenantId
);

define_identifier!(
    /// Organization identifier, always scoped under a tenant.
    OrganizationId,
    HierarchyRule::InvalidOrganizationId
);

define_identifier!(
    /// Department identifier, always scoped under an organization.
    DepartmentId,
    HierarchyRule::InvalidDepartmentId
);

define_identifier!(
    /// User identifier, anchored directly under a tenant.
    UserId,
    HierarchyRule::InvalidUserId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tenant_id_validation() {
        assert!(TenantId::new("comp_123").is_ok());
        assert!(TenantId::new("").is_err());
        assert!(TenantId::new("a".repeat(MAX_IDENTIFIER_LENGTH)).is_ok());
        assert!(TenantId::new("a".repeat(MAX_IDENTIFIER_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_identifier_rejects_delimiter_and_whitespace() {
        assert!(OrganizationId::new("org:1").is_err());
        assert!(OrganizationId::new("org 1").is_err());
        assert!(OrganizationId::new("org\n1").is_err());
        assert!(OrganizationId::new("org-1.eu@acme").is_ok());
    }

    #[test]
    fn test_invalid_identifier_reports_tier_rule() {
        let err = DepartmentId::new("").unwrap_err();
        assert_eq!(err.rule(), HierarchyRule::InvalidDepartmentId);

        let err = UserId::new("bad:user").unwrap_err();
        assert_eq!(
            err,
            IsolationError::hierarchy(HierarchyRule::InvalidUserId, "bad:user")
        );
    }

    #[test]
    fn test_identifier_equality_is_value_equality() {
        let a = TenantId::new("t1").unwrap();
        let b = TenantId::from_str("t1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, TenantId::new("t2").unwrap());
    }

    #[test]
    fn test_identifier_display_and_into_inner() {
        let id = UserId::new("u1").unwrap();
        assert_eq!(format!("{}", id), "u1");
        assert_eq!(id.as_str(), "u1");
        assert_eq!(id.into_inner(), "u1");
    }

    #[test]
    fn test_identifier_serde_is_transparent_and_validated() {
        let id = TenantId::new("t1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t1\"");

        let parsed: TenantId = serde_json::from_str("\"t1\"").unwrap();
        assert_eq!(parsed, id);
        assert!(serde_json::from_str::<TenantId>("\"\"").is_err());
    }
}
