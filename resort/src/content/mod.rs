//! Orderable site content with a recycle bin.
//!
//! Gallery images, explore cards and hero slides share one lifecycle:
//!
//! ```text
//!  create ──► live ──soft_delete──► recycle bin ──purge──► gone
//!                                        │
//!                                        └──restore──► new live item (new id)
//! ```
//!
//! A live item appears publicly when it is also active. The public view
//! (active and live), the admin view (live) and the recycle bin are the
//! three [`ListScope`]s.

mod item;
mod kind;
mod lifecycle;
mod scope;

#[cfg(test)]
mod proptests;

pub use item::{
    ContentFields, ContentItem, ContentPatch, ExploreCardFields, GalleryImageFields,
    HeroSlideFields, NewContent, DEFAULT_GALLERY_TITLE,
};
pub use kind::ContentKind;
pub use lifecycle::{ContentLifecycle, SoftDeleteOutcome};
pub use scope::ListScope;
