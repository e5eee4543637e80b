//! # Sharing Resolver
//!
//! Decides whether a caller context may access data owned by a target
//! context that carries a declared [`SharingLevel`].
//!
//! The sharing level names the coarsest tier of caller allowed to see the
//! data. Two checks guard each tier:
//! - the target must be anchored at that tier or a more specific one, so a
//!   coarse target never matches on an identifier it does not have
//! - the caller and the target must carry the same identifier at that tier
//!
//! A missing identifier on either side is a mismatch, never an error.

use crate::context::IsolationContext;
use crate::levels::{IsolationLevel, SharingLevel};
use crate::traits::Isolated;

/// Whether `caller` may access data owned by `target` and shared at
/// `sharing_level`. Platform callers always can.
pub fn can_access(
    caller: &IsolationContext,
    target: &IsolationContext,
    sharing_level: SharingLevel,
) -> bool {
    let allowed = caller.is_platform() || can_share_with(caller, target, sharing_level);

    tracing::trace!(
        caller_level = %caller.level(),
        target_level = %target.level(),
        sharing_level = %sharing_level,
        allowed,
        "Isolation access decision"
    );

    allowed
}

/// Tier-by-tier sharing check, without the platform bypass of [`can_access`].
pub fn can_share_with(
    caller: &IsolationContext,
    target: &IsolationContext,
    sharing_level: SharingLevel,
) -> bool {
    let target_level = target.level();

    match sharing_level {
        SharingLevel::Platform => true,
        SharingLevel::Tenant => {
            target_level.is_at_least(IsolationLevel::Tenant)
                && same_identifier(caller.tenant_id(), target.tenant_id())
        }
        SharingLevel::Organization => {
            target_level.is_at_least(IsolationLevel::Organization)
                && same_identifier(caller.organization_id(), target.organization_id())
        }
        SharingLevel::Department => {
            target_level.is_at_least(IsolationLevel::Department)
                && same_identifier(caller.department_id(), target.department_id())
        }
        SharingLevel::User => {
            target_level == IsolationLevel::User
                && same_identifier(caller.user_id(), target.user_id())
        }
    }
}

fn same_identifier<T: PartialEq>(caller: Option<&T>, target: Option<&T>) -> bool {
    matches!((caller, target), (Some(a), Some(b)) if a == b)
}

/// Applies [`can_access`] to [`Isolated`] items, filling in a sharing level
/// for items that do not declare one.
///
/// The default comes from configuration; when unset, an item is shared at
/// its owner's own level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessResolver {
    default_sharing_level: Option<SharingLevel>,
}

impl AccessResolver {
    #[must_use]
    pub fn new(default_sharing_level: Option<SharingLevel>) -> Self {
        Self {
            default_sharing_level,
        }
    }

    #[must_use]
    pub fn default_sharing_level(&self) -> Option<SharingLevel> {
        self.default_sharing_level
    }

    /// Sharing level used when checking access to `item`.
    pub fn effective_sharing_level<T: Isolated + ?Sized>(&self, item: &T) -> SharingLevel {
        item.sharing_level()
            .or(self.default_sharing_level)
            .unwrap_or_else(|| SharingLevel::from(item.isolation_context().level()))
    }

    pub fn can_read<T: Isolated + ?Sized>(&self, caller: &IsolationContext, item: &T) -> bool {
        can_access(
            caller,
            item.isolation_context(),
            self.effective_sharing_level(item),
        )
    }

    /// Items from `items` that `caller` may see, in their original order.
    pub fn filter_visible<'a, T, I>(&self, caller: &IsolationContext, items: I) -> Vec<&'a T>
    where
        T: Isolated + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .filter(|item| self.can_read(caller, *item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{DepartmentId, OrganizationId, TenantId, UserId};

    fn tenant(t: &str) -> IsolationContext {
        IsolationContext::tenant(TenantId::new(t).unwrap())
    }

    fn org(t: &str, o: &str) -> IsolationContext {
        IsolationContext::organization(TenantId::new(t).unwrap(), OrganizationId::new(o).unwrap())
    }

    fn dept(t: &str, o: &str, d: &str) -> IsolationContext {
        IsolationContext::department(
            TenantId::new(t).unwrap(),
            OrganizationId::new(o).unwrap(),
            DepartmentId::new(d).unwrap(),
        )
    }

    fn user(t: &str, u: &str) -> IsolationContext {
        IsolationContext::user(UserId::new(u).unwrap(), Some(TenantId::new(t).unwrap())).unwrap()
    }

    struct Record {
        owner: IsolationContext,
        sharing: Option<SharingLevel>,
    }

    impl Isolated for Record {
        fn isolation_context(&self) -> &IsolationContext {
            &self.owner
        }

        fn sharing_level(&self) -> Option<SharingLevel> {
            self.sharing
        }
    }

    #[test]
    fn test_platform_caller_reads_everything() {
        let caller = IsolationContext::platform();
        for sharing in [
            SharingLevel::Platform,
            SharingLevel::Tenant,
            SharingLevel::Organization,
            SharingLevel::Department,
            SharingLevel::User,
        ] {
            assert!(can_access(&caller, &user("t1", "u1"), sharing));
            assert!(can_access(&caller, &IsolationContext::platform(), sharing));
        }
    }

    #[test]
    fn test_platform_sharing_is_public() {
        assert!(can_share_with(
            &tenant("t2"),
            &dept("t1", "o1", "d1"),
            SharingLevel::Platform
        ));
    }

    #[test]
    fn test_tenant_sharing_matches_tenant() {
        let target = org("t1", "o1");
        assert!(can_access(&user("t1", "u9"), &target, SharingLevel::Tenant));
        assert!(!can_access(&user("t2", "u9"), &target, SharingLevel::Tenant));
    }

    #[test]
    fn test_tenant_sharing_rejects_platform_target() {
        assert!(!can_share_with(
            &tenant("t1"),
            &IsolationContext::platform(),
            SharingLevel::Tenant
        ));
    }

    #[test]
    fn test_organization_sharing_from_department_caller() {
        let target = org("T1", "O1");
        assert!(can_access(&dept("T1", "O1", "D1"), &target, SharingLevel::Organization));
        assert!(!can_access(&dept("T1", "O2", "D1"), &target, SharingLevel::Organization));
    }

    #[test]
    fn test_organization_sharing_rejects_coarser_caller() {
        assert!(!can_access(&tenant("T1"), &org("T1", "O1"), SharingLevel::Organization));
    }

    #[test]
    fn test_organization_sharing_rejects_tenant_target() {
        assert!(!can_access(&org("T1", "O1"), &tenant("T1"), SharingLevel::Organization));
    }

    #[test]
    fn test_department_sharing() {
        let target = dept("t1", "o1", "d1");
        assert!(can_access(&dept("t1", "o1", "d1"), &target, SharingLevel::Department));
        assert!(!can_access(&dept("t1", "o1", "d2"), &target, SharingLevel::Department));
        assert!(!can_access(&org("t1", "o1"), &target, SharingLevel::Department));
    }

    #[test]
    fn test_user_sharing_requires_user_target() {
        let target = user("t1", "u1");
        assert!(can_access(&user("t1", "u1"), &target, SharingLevel::User));
        assert!(!can_access(&user("t1", "u2"), &target, SharingLevel::User));
        assert!(!can_share_with(&user("t1", "u1"), &dept("t1", "o1", "d1"), SharingLevel::User));
    }

    #[test]
    fn test_resolver_prefers_declared_sharing_level() {
        let resolver = AccessResolver::new(Some(SharingLevel::User));
        let record = Record {
            owner: org("t1", "o1"),
            sharing: Some(SharingLevel::Tenant),
        };
        assert_eq!(resolver.effective_sharing_level(&record), SharingLevel::Tenant);
        assert!(resolver.can_read(&tenant("t1"), &record));
    }

    #[test]
    fn test_resolver_falls_back_to_configured_default() {
        let resolver = AccessResolver::new(Some(SharingLevel::Tenant));
        let record = Record {
            owner: dept("t1", "o1", "d1"),
            sharing: None,
        };
        assert_eq!(resolver.effective_sharing_level(&record), SharingLevel::Tenant);
        assert!(resolver.can_read(&tenant("t1"), &record));
    }

    #[test]
    fn test_resolver_defaults_to_owner_level() {
        let resolver = AccessResolver::default();
        let record = Record {
            owner: org("t1", "o1"),
            sharing: None,
        };
        assert_eq!(
            resolver.effective_sharing_level(&record),
            SharingLevel::Organization
        );
        assert!(resolver.can_read(&dept("t1", "o1", "d7"), &record));
        assert!(!resolver.can_read(&tenant("t1"), &record));
    }

    #[test]
    fn test_filter_visible_keeps_order() {
        let resolver = AccessResolver::default();
        let records = vec![
            Record {
                owner: org("t1", "o1"),
                sharing: None,
            },
            Record {
                owner: org("t1", "o2"),
                sharing: None,
            },
            Record {
                owner: org("t1", "o3"),
                sharing: Some(SharingLevel::Tenant),
            },
        ];

        let visible = resolver.filter_visible(&org("t1", "o1"), &records);
        assert_eq!(visible.len(), 2);
        assert_eq!(
            visible[0].owner.organization_id().map(OrganizationId::as_str),
            Some("o1")
        );
        assert_eq!(
            visible[1].owner.organization_id().map(OrganizationId::as_str),
            Some("o3")
        );
    }
}
