//! Core traits for isolation-aware collaborators

use crate::context::IsolationContext;
use crate::levels::SharingLevel;

/// Anything owned by an isolation context: stored records, cache entries,
/// documents returned by a repository.
///
/// Persistence and authorization layers use this seam to hand owned items to
/// the [`AccessResolver`](crate::sharing::AccessResolver) without the engine
/// knowing their concrete types.
pub trait Isolated {
    /// The context that owns this item.
    fn isolation_context(&self) -> &IsolationContext;

    /// Sharing level declared on the item. `None` falls back to the
    /// resolver's default.
    fn sharing_level(&self) -> Option<SharingLevel> {
        None
    }
}

impl Isolated for IsolationContext {
    fn isolation_context(&self) -> &IsolationContext {
        self
    }
}

impl<T: Isolated + ?Sized> Isolated for &T {
    fn isolation_context(&self) -> &IsolationContext {
        (**self).isolation_context()
    }

    fn sharing_level(&self) -> Option<SharingLevel> {
        (**self).sharing_level()
    }
}
