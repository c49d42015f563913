//! The orderable content collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the three independently ordered content collections.
///
/// # Examples
///
/// ```
/// use resort::ContentKind;
///
/// let kind: ContentKind = "hero".parse().unwrap();
/// assert_eq!(kind, ContentKind::HeroSlide);
/// assert_eq!(kind.table(), "hero_slides");
/// assert_eq!(kind.upload_dir(), "hero");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Images shown in the photo gallery.
    GalleryImage,
    /// Feature cards on the explore section.
    ExploreCard,
    /// Slides of the landing page slideshow.
    HeroSlide,
}

impl ContentKind {
    /// All content kinds.
    pub const ALL: [Self; 3] = [Self::GalleryImage, Self::ExploreCard, Self::HeroSlide];

    /// The table holding items of this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::GalleryImage => "gallery_images",
            Self::ExploreCard => "explore_cards",
            Self::HeroSlide => "hero_slides",
        }
    }

    /// The kind-specific columns, in storage order.
    #[must_use]
    pub const fn field_columns(self) -> &'static [&'static str] {
        match self {
            Self::GalleryImage => &["title", "image_url"],
            Self::ExploreCard => &[
                "title",
                "short_description",
                "full_description",
                "image_url",
            ],
            Self::HeroSlide => &["title", "subtitle", "image_url"],
        }
    }

    /// Subdirectory of the uploads root, also used as the filename prefix.
    #[must_use]
    pub const fn upload_dir(self) -> &'static str {
        match self {
            Self::GalleryImage => "gallery",
            Self::ExploreCard => "explore",
            Self::HeroSlide => "hero",
        }
    }

    /// Whether `field` is a kind-specific column of this kind.
    #[must_use]
    pub fn has_field(self, field: &str) -> bool {
        self.field_columns().contains(&field)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GalleryImage => write!(f, "gallery image"),
            Self::ExploreCard => write!(f, "explore card"),
            Self::HeroSlide => write!(f, "hero slide"),
        }
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "gallery" | "gallery-image" | "gallery-images" => Ok(Self::GalleryImage),
            "explore" | "explore-card" | "explore-cards" => Ok(Self::ExploreCard),
            "hero" | "hero-slide" | "hero-slides" => Ok(Self::HeroSlide),
            other => Err(Error::Validation {
                field: "kind".into(),
                message: format!("unknown content collection '{other}' (expected gallery, explore or hero)"),
            }),
        }
    }
}
