//! Content items and their kind-specific fields.

use std::time::SystemTime;

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ContentKind;
use crate::booking::validation::{field_errors, non_blank};
use crate::error::{Error, FieldError, Result};

/// Title used for gallery images created without one.
pub const DEFAULT_GALLERY_TITLE: &str = "Resort View";

/// Fields of a gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GalleryImageFields {
    /// Caption.
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "non_blank")
    )]
    pub title: String,
    /// Image URL or uploads path.
    #[validate(custom(function = "non_blank"))]
    pub image_url: String,
}

/// Fields of an explore card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ExploreCardFields {
    /// Card heading.
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "non_blank")
    )]
    pub title: String,
    /// Teaser text shown on the card.
    #[validate(
        length(max = 300, message = "Ensure this field has no more than 300 characters."),
        custom(function = "non_blank")
    )]
    pub short_description: String,
    /// Text shown when the card is opened.
    #[serde(default)]
    pub full_description: String,
    /// Image URL or uploads path.
    #[validate(custom(function = "non_blank"))]
    pub image_url: String,
}

/// Fields of a hero slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct HeroSlideFields {
    /// Headline.
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "non_blank")
    )]
    pub title: String,
    /// Line under the headline.
    #[validate(
        length(max = 300, message = "Ensure this field has no more than 300 characters."),
        custom(function = "non_blank")
    )]
    pub subtitle: String,
    /// Background image URL or uploads path.
    #[validate(custom(function = "non_blank"))]
    pub image_url: String,
}

/// The content fields of an item, one variant per collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentFields {
    /// A gallery image.
    GalleryImage(GalleryImageFields),
    /// An explore card.
    ExploreCard(ExploreCardFields),
    /// A hero slide.
    HeroSlide(HeroSlideFields),
}

impl ContentFields {
    /// Gallery image fields; a missing title falls back to [`DEFAULT_GALLERY_TITLE`].
    #[must_use]
    pub fn gallery_image(title: Option<String>, image_url: impl Into<String>) -> Self {
        Self::GalleryImage(GalleryImageFields {
            title: title.unwrap_or_else(|| DEFAULT_GALLERY_TITLE.to_string()),
            image_url: image_url.into(),
        })
    }

    /// Explore card fields.
    #[must_use]
    pub fn explore_card(
        title: impl Into<String>,
        short_description: impl Into<String>,
        full_description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self::ExploreCard(ExploreCardFields {
            title: title.into(),
            short_description: short_description.into(),
            full_description: full_description.into(),
            image_url: image_url.into(),
        })
    }

    /// Hero slide fields.
    #[must_use]
    pub fn hero_slide(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self::HeroSlide(HeroSlideFields {
            title: title.into(),
            subtitle: subtitle.into(),
            image_url: image_url.into(),
        })
    }

    /// The collection these fields belong to.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::GalleryImage(_) => ContentKind::GalleryImage,
            Self::ExploreCard(_) => ContentKind::ExploreCard,
            Self::HeroSlide(_) => ContentKind::HeroSlide,
        }
    }

    /// The title shared by all kinds.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::GalleryImage(f) => &f.title,
            Self::ExploreCard(f) => &f.title,
            Self::HeroSlide(f) => &f.title,
        }
    }

    /// The image URL shared by all kinds.
    #[must_use]
    pub fn image_url(&self) -> &str {
        match self {
            Self::GalleryImage(f) => &f.image_url,
            Self::ExploreCard(f) => &f.image_url,
            Self::HeroSlide(f) => &f.image_url,
        }
    }

    /// Checks lengths and required values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` listing every failed rule.
    pub fn validate(&self) -> Result<()> {
        let outcome = match self {
            Self::GalleryImage(f) => f.validate(),
            Self::ExploreCard(f) => f.validate(),
            Self::HeroSlide(f) => f.validate(),
        };
        outcome.map_err(|e| Error::validation_failed(field_errors(&e)))
    }

    /// Values for [`ContentKind::field_columns`], in the same order.
    pub(crate) fn column_values(&self) -> Vec<Value> {
        match self {
            Self::GalleryImage(f) => vec![f.title.clone().into(), f.image_url.clone().into()],
            Self::ExploreCard(f) => vec![
                f.title.clone().into(),
                f.short_description.clone().into(),
                f.full_description.clone().into(),
                f.image_url.clone().into(),
            ],
            Self::HeroSlide(f) => vec![
                f.title.clone().into(),
                f.subtitle.clone().into(),
                f.image_url.clone().into(),
            ],
        }
    }

    /// Reads the kind-specific columns starting at `offset`.
    pub(crate) fn from_row(
        kind: ContentKind,
        row: &rusqlite::Row<'_>,
        offset: usize,
    ) -> rusqlite::Result<Self> {
        Ok(match kind {
            ContentKind::GalleryImage => Self::GalleryImage(GalleryImageFields {
                title: row.get(offset)?,
                image_url: row.get(offset + 1)?,
            }),
            ContentKind::ExploreCard => Self::ExploreCard(ExploreCardFields {
                title: row.get(offset)?,
                short_description: row.get(offset + 1)?,
                full_description: row.get(offset + 2)?,
                image_url: row.get(offset + 3)?,
            }),
            ContentKind::HeroSlide => Self::HeroSlide(HeroSlideFields {
                title: row.get(offset)?,
                subtitle: row.get(offset + 1)?,
                image_url: row.get(offset + 2)?,
            }),
        })
    }

    fn apply(&mut self, patch: &ContentPatch) -> Result<()> {
        let kind = self.kind();
        let misplaced: Vec<FieldError> = patch
            .text_fields()
            .filter(|(name, value)| value.is_some() && !kind.has_field(name))
            .map(|(name, _)| FieldError::new(name, format!("not a field of a {kind}")))
            .collect();
        if !misplaced.is_empty() {
            return Err(Error::validation_failed(misplaced));
        }

        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                target.clone_from(v);
            }
        };
        match self {
            Self::GalleryImage(f) => {
                set(&mut f.title, &patch.title);
                set(&mut f.image_url, &patch.image_url);
            }
            Self::ExploreCard(f) => {
                set(&mut f.title, &patch.title);
                set(&mut f.short_description, &patch.short_description);
                set(&mut f.full_description, &patch.full_description);
                set(&mut f.image_url, &patch.image_url);
            }
            Self::HeroSlide(f) => {
                set(&mut f.title, &patch.title);
                set(&mut f.subtitle, &patch.subtitle);
                set(&mut f.image_url, &patch.image_url);
            }
        }
        Ok(())
    }
}

/// A stored content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// Database identity. Never reused, even after a purge.
    pub id: i64,
    /// Kind-specific content.
    pub fields: ContentFields,
    /// Display position among live items; not necessarily contiguous.
    pub order: u32,
    /// Whether the item appears in public listings.
    pub is_active: bool,
    /// Whether the item is in the recycle bin.
    pub is_deleted: bool,
    /// When the item was moved to the recycle bin.
    pub deleted_at: Option<SystemTime>,
    /// When the item was created.
    pub created_at: SystemTime,
}

impl ContentItem {
    /// The collection this item belongs to.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        self.fields.kind()
    }

    /// Visible on the public site.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_active && !self.is_deleted
    }

    /// In the recycle bin.
    #[must_use]
    pub const fn in_recycle_bin(&self) -> bool {
        self.is_deleted
    }

    /// Applies a partial update in place.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the patch names a field this kind does
    /// not have, or if the result breaks a field rule.
    pub fn apply(&mut self, patch: &ContentPatch) -> Result<()> {
        let mut fields = self.fields.clone();
        fields.apply(patch)?;
        fields.validate()?;
        self.fields = fields;
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
        }
        Ok(())
    }
}

/// A content item to be created.
///
/// # Examples
///
/// ```
/// use resort::{ContentFields, NewContent};
///
/// let new = NewContent::new(ContentFields::gallery_image(None, "/uploads/gallery/a.jpg"))
///     .with_order(3);
/// assert_eq!(new.fields.title(), "Resort View");
/// assert!(new.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    /// Kind-specific content.
    pub fields: ContentFields,
    /// Display position.
    pub order: u32,
    /// Whether the item starts out public.
    pub is_active: bool,
}

impl NewContent {
    /// An active item at order 0.
    #[must_use]
    pub const fn new(fields: ContentFields) -> Self {
        Self {
            fields,
            order: 0,
            is_active: true,
        }
    }

    /// Sets the display position.
    #[must_use]
    pub const fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Sets whether the item starts out public.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    /// The collection this item will join.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        self.fields.kind()
    }
}

/// A partial update to a content item. `None` leaves a value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPatch {
    /// New title.
    pub title: Option<String>,
    /// New image URL.
    pub image_url: Option<String>,
    /// New short description (explore cards).
    pub short_description: Option<String>,
    /// New full description (explore cards).
    pub full_description: Option<String>,
    /// New subtitle (hero slides).
    pub subtitle: Option<String>,
    /// New display position.
    pub order: Option<u32>,
    /// New active flag.
    pub is_active: Option<bool>,
}

impl ContentPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text_fields().all(|(_, v)| v.is_none())
            && self.order.is_none()
            && self.is_active.is_none()
    }

    /// Names of the fields this patch sets.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .text_fields()
            .filter(|(_, v)| v.is_some())
            .map(|(name, _)| name)
            .collect();
        if self.order.is_some() {
            names.push("order");
        }
        if self.is_active.is_some() {
            names.push("is_active");
        }
        names
    }

    fn text_fields(&self) -> impl Iterator<Item = (&'static str, &Option<String>)> {
        [
            ("title", &self.title),
            ("image_url", &self.image_url),
            ("short_description", &self.short_description),
            ("full_description", &self.full_description),
            ("subtitle", &self.subtitle),
        ]
        .into_iter()
    }
}
