//! The soft-delete lifecycle of a content collection.
//!
//! An item is created live, moves to the recycle bin on soft delete (keeping
//! its identity), and from there is either purged or restored. Restore does
//! not flip the item back in place: it recreates the content as a new item
//! at the end of the live ordering and purges the original, so the old
//! identity is gone for good.
//!
//! [`ContentLifecycle`] borrows a connection. Restore runs two writes and an
//! aggregate read; give it an IMMEDIATE transaction (see
//! [`Database::begin_transaction`]) when other writers may be active.

use std::time::SystemTime;

use rusqlite::Connection;

use super::{ContentItem, ContentKind, ContentPatch, ListScope, NewContent};
use crate::database::Database;
use crate::error::{Error, FieldError, Result};

/// Result of a soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoftDeleteOutcome {
    /// The item moved to the recycle bin.
    Deleted(ContentItem),
    /// The item was already in the recycle bin; nothing changed.
    AlreadyDeleted(ContentItem),
}

impl SoftDeleteOutcome {
    /// The item as it now stands.
    #[must_use]
    pub const fn item(&self) -> &ContentItem {
        match self {
            Self::Deleted(item) | Self::AlreadyDeleted(item) => item,
        }
    }

    /// Whether this call changed anything.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// Lifecycle operations on one content collection.
///
/// # Examples
///
/// ```
/// use std::time::SystemTime;
/// use rusqlite::Connection;
/// use resort::database::migrations::initialize_schema;
/// use resort::{ContentFields, ContentKind, ContentLifecycle, ListScope, NewContent};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
///
/// let gallery = ContentLifecycle::new(&conn, ContentKind::GalleryImage);
/// let now = SystemTime::now();
/// let image = gallery
///     .create(&NewContent::new(ContentFields::gallery_image(None, "/uploads/gallery/a.jpg")), now)
///     .unwrap();
///
/// gallery.soft_delete(image.id, now).unwrap();
/// assert!(gallery.list(ListScope::Active).unwrap().is_empty());
///
/// let restored = gallery.restore(image.id, now).unwrap();
/// assert_ne!(restored.id, image.id);
/// assert_eq!(restored.order, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentLifecycle<'a> {
    conn: &'a Connection,
    kind: ContentKind,
}

impl<'a> ContentLifecycle<'a> {
    /// Operates on the `kind` collection through `conn`.
    #[must_use]
    pub const fn new(conn: &'a Connection, kind: ContentKind) -> Self {
        Self { conn, kind }
    }

    /// The collection this lifecycle manages.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        self.kind
    }

    fn not_found(&self, id: i64) -> Error {
        Error::not_found(format!("{} #{id}", self.kind))
    }

    fn in_bin(&self, id: i64) -> Result<ContentItem> {
        match self.get(id)? {
            Some(item) if item.is_deleted => Ok(item),
            _ => Err(self.not_found(id)),
        }
    }

    /// Creates a live item.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the fields break a rule or belong to a
    /// different collection, or a database error.
    pub fn create(&self, new: &NewContent, now: SystemTime) -> Result<ContentItem> {
        if new.kind() != self.kind {
            return Err(Error::validation_failed(vec![FieldError::new(
                "kind",
                format!("expected a {}, got a {}", self.kind, new.kind()),
            )]));
        }
        new.fields.validate()?;
        let item = Database::insert_content(self.conn, new, now)?;
        log::debug!("created {} #{}", self.kind, item.id);
        Ok(item)
    }

    /// Looks up an item by identity, wherever it is short of being purged.
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub fn get(&self, id: i64) -> Result<Option<ContentItem>> {
        Database::get_content(self.conn, self.kind, id)
    }

    /// Applies a partial update to a live item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the item does not exist or is in the recycle
    /// bin, and `ValidationFailed` if the patch is rejected.
    pub fn update(&self, id: i64, patch: &ContentPatch) -> Result<ContentItem> {
        let mut item = match self.get(id)? {
            Some(item) if !item.is_deleted => item,
            _ => return Err(self.not_found(id)),
        };
        item.apply(patch)?;
        if !Database::update_content(self.conn, &item)? {
            return Err(self.not_found(id));
        }
        log::debug!("updated {} #{id}: {}", self.kind, patch.changed_fields().join(", "));
        Ok(item)
    }

    /// Moves an item to the recycle bin.
    ///
    /// A second call on an item already in the bin succeeds without touching
    /// it; its `deleted_at` keeps the time of the first call.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no such item.
    pub fn soft_delete(&self, id: i64, now: SystemTime) -> Result<SoftDeleteOutcome> {
        let item = self.get(id)?.ok_or_else(|| self.not_found(id))?;
        if item.is_deleted {
            log::debug!("{} #{id} is already in the recycle bin", self.kind);
            return Ok(SoftDeleteOutcome::AlreadyDeleted(item));
        }
        Database::mark_content_deleted(self.conn, self.kind, id, now)?;
        let item = self.get(id)?.ok_or_else(|| self.not_found(id))?;
        log::info!("moved {} #{id} to the recycle bin", self.kind);
        Ok(SoftDeleteOutcome::Deleted(item))
    }

    /// Restores an item from the recycle bin as a new item.
    ///
    /// The new item copies the content fields, is active, and is placed
    /// after every live item (order = highest live order + 1, or 1 for an
    /// empty collection). The original row is then purged.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless the item is currently in the recycle bin.
    pub fn restore(&self, id: i64, now: SystemTime) -> Result<ContentItem> {
        let original = self.in_bin(id)?;
        let order = Database::max_live_order(self.conn, self.kind)?.saturating_add(1);

        let replacement = NewContent::new(original.fields).with_order(order);
        let restored = Database::insert_content(self.conn, &replacement, now)?;
        Database::delete_content(self.conn, self.kind, id)?;

        log::info!(
            "restored {} #{id} as #{} at position {order}",
            self.kind,
            restored.id
        );
        Ok(restored)
    }

    /// Removes an item from the recycle bin for good.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` unless the item is currently in the recycle bin.
    pub fn purge(&self, id: i64) -> Result<ContentItem> {
        let item = self.in_bin(id)?;
        Database::delete_content(self.conn, self.kind, id)?;
        log::info!("purged {} #{id}", self.kind);
        Ok(item)
    }

    /// Lists the collection in a scope.
    ///
    /// # Errors
    ///
    /// Returns a database error.
    pub fn list(&self, scope: ListScope) -> Result<Vec<ContentItem>> {
        Database::list_content(self.conn, self.kind, scope)
    }
}
