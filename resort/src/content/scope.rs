//! List scopes over a content collection.

use std::fmt;

use super::ContentItem;

/// Which slice of a collection a listing returns.
///
/// The public and recycle-bin views never overlap; together with the
/// admin view they cover every item that has not been purged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListScope {
    /// Active, not deleted. Ordered by `(order, id)`.
    #[default]
    Active,
    /// Everything not deleted, active or not. Ordered by `(order, id)`.
    All,
    /// The recycle bin, most recently deleted first.
    Deleted,
}

impl ListScope {
    /// Maps the `deleted` / `all` request flags to a scope.
    ///
    /// `deleted` wins when both are set.
    ///
    /// # Examples
    ///
    /// ```
    /// use resort::ListScope;
    ///
    /// assert_eq!(ListScope::from_flags(false, false), ListScope::Active);
    /// assert_eq!(ListScope::from_flags(false, true), ListScope::All);
    /// assert_eq!(ListScope::from_flags(true, true), ListScope::Deleted);
    /// ```
    #[must_use]
    pub const fn from_flags(deleted: bool, all: bool) -> Self {
        if deleted {
            Self::Deleted
        } else if all {
            Self::All
        } else {
            Self::Active
        }
    }

    /// Whether an item belongs in this scope.
    #[must_use]
    pub const fn contains(self, item: &ContentItem) -> bool {
        match self {
            Self::Active => item.is_active && !item.is_deleted,
            Self::All => !item.is_deleted,
            Self::Deleted => item.is_deleted,
        }
    }

    /// SQL predicate selecting this scope.
    pub(crate) const fn predicate(self) -> &'static str {
        match self {
            Self::Active => "is_active = 1 AND is_deleted = 0",
            Self::All => "is_deleted = 0",
            Self::Deleted => "is_deleted = 1",
        }
    }

    /// SQL ordering for this scope.
    pub(crate) const fn ordering(self) -> &'static str {
        match self {
            Self::Active | Self::All => "sort_order ASC, id ASC",
            Self::Deleted => "deleted_at DESC, id DESC",
        }
    }
}

impl fmt::Display for ListScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::All => write!(f, "all"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}
