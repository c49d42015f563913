#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # resort
//!
//! Booking and content backend for a small resort.
//!
//! Room and event bookings get sequential, human-readable codes
//! (`R0000000001`, `E0000000001`). The gallery, the explore cards and the
//! hero slides share a soft-delete lifecycle: deleted items sit in a
//! recycle bin until they are restored or purged.
//!
//! ## Core Types
//!
//! - [`SequenceAllocator`], [`BookingCode`] and [`BookingKind`]: code allocation
//! - [`ContentLifecycle`], [`ContentItem`] and [`ListScope`]: the recycle bin
//! - [`Database`]: `SQLite` persistence
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use rusqlite::Connection;
//! use std::time::SystemTime;
//! use resort::database::migrations::initialize_schema;
//! use resort::{ContentFields, ContentKind, ContentLifecycle, ListScope, NewContent};
//!
//! let conn = Connection::open_in_memory().unwrap();
//! initialize_schema(&conn).unwrap();
//!
//! let gallery = ContentLifecycle::new(&conn, ContentKind::GalleryImage);
//! let item = gallery
//!     .create(
//!         &NewContent::new(ContentFields::gallery_image(None, "/uploads/gallery/pool.jpg")),
//!         SystemTime::now(),
//!     )
//!     .unwrap();
//!
//! gallery.soft_delete(item.id, SystemTime::now()).unwrap();
//! assert!(gallery.list(ListScope::Active).unwrap().is_empty());
//! assert_eq!(gallery.list(ListScope::Deleted).unwrap().len(), 1);
//! ```

pub mod booking;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod logging;
pub mod media;
pub mod notify;
pub mod operations;
pub mod site;

// Re-export key types at crate root for convenience
pub use booking::{
    Booking, BookingCode, BookingKind, BookingRef, BookingStatus, BookingValidator,
    SequenceAllocator,
};
pub use config::{Config, ConfigBuilder};
pub use content::{
    ContentFields, ContentItem, ContentKind, ContentLifecycle, ContentPatch, ListScope,
    NewContent, SoftDeleteOutcome,
};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, FieldError, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use media::{MediaStore, StoredMedia};
pub use notify::{LogNotifier, Notifier, NullNotifier};
pub use operations::{
    BookingPlan, ContentPlan, ExecutionResult, OperationPlan, PlanAction, PlanExecutor,
    StatusPlan,
};
pub use site::{SiteContent, SiteContentPatch};
