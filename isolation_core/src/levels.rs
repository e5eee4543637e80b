//! Isolation and sharing levels.
//!
//! Both enums share the same five tiers and the same total order
//! `Platform < Tenant < Organization < Department < User`, from least to most
//! specific. [`IsolationLevel`] describes where a context is anchored;
//! [`SharingLevel`] is declared on data and names the coarsest tier of caller
//! allowed to see it.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IsolationLevel {
    Platform,
    Tenant,
    Organization,
    Department,
    User,
}

impl IsolationLevel {
    /// Every level, least specific first.
    pub const ALL: [IsolationLevel; 5] = [
        IsolationLevel::Platform,
        IsolationLevel::Tenant,
        IsolationLevel::Organization,
        IsolationLevel::Department,
        IsolationLevel::User,
    ];

    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            IsolationLevel::Platform => 0,
            IsolationLevel::Tenant => 1,
            IsolationLevel::Organization => 2,
            IsolationLevel::Department => 3,
            IsolationLevel::User => 4,
        }
    }

    /// Index difference between `a` and `b`: negative when `a` is less
    /// specific, zero when equal, positive when more specific.
    #[must_use]
    pub fn compare(a: IsolationLevel, b: IsolationLevel) -> i32 {
        i32::from(a.rank()) - i32::from(b.rank())
    }

    /// Whether `self` is `other` or more specific.
    #[must_use]
    pub fn is_at_least(self, other: IsolationLevel) -> bool {
        Self::compare(self, other) >= 0
    }

    /// Field name used for this tier's identifier in log fields and query
    /// predicates. The platform has no identifier.
    #[must_use]
    pub fn id_field(self) -> Option<&'static str> {
        match self {
            IsolationLevel::Platform => None,
            IsolationLevel::Tenant => Some("tenantId"),
            IsolationLevel::Organization => Some("organizationId"),
            IsolationLevel::Department => Some("departmentId"),
            IsolationLevel::User => Some("userId"),
        }
    }

    #[must_use]
    pub fn cache_segment(self) -> &'static str {
        match self {
            IsolationLevel::Platform => "platform",
            IsolationLevel::Tenant => "tenant",
            IsolationLevel::Organization => "org",
            IsolationLevel::Department => "dept",
            IsolationLevel::User => "user",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SharingLevel {
    Platform,
    Tenant,
    Organization,
    Department,
    User,
}

impl SharingLevel {
    #[must_use]
    pub fn as_isolation_level(self) -> IsolationLevel {
        match self {
            SharingLevel::Platform => IsolationLevel::Platform,
            SharingLevel::Tenant => IsolationLevel::Tenant,
            SharingLevel::Organization => IsolationLevel::Organization,
            SharingLevel::Department => IsolationLevel::Department,
            SharingLevel::User => IsolationLevel::User,
        }
    }

    #[must_use]
    pub fn compare(a: SharingLevel, b: SharingLevel) -> i32 {
        IsolationLevel::compare(a.as_isolation_level(), b.as_isolation_level())
    }
}

impl From<IsolationLevel> for SharingLevel {
    fn from(level: IsolationLevel) -> Self {
        match level {
            IsolationLevel::Platform => SharingLevel::Platform,
            IsolationLevel::Tenant => SharingLevel::Tenant,
            IsolationLevel::Organization => SharingLevel::Organization,
            IsolationLevel::Department => SharingLevel::Department,
            IsolationLevel::User => SharingLevel::User,
        }
    }
}
