//! The editable site content record.
//!
//! There is exactly one of these. It is created with default values the
//! first time anyone reads it, and updated in place afterwards.

use std::borrow::Cow;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::booking::validation::field_errors;
use crate::error::{Error, Result};

fn web_link(value: &str) -> std::result::Result<(), ValidationError> {
    if value.is_empty() || value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(ValidationError::new("url").with_message(Cow::Borrowed("Enter a valid URL.")))
}

/// Landing page captions, contact details and social links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SiteContent {
    /// First slide headline.
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub slide1_title: String,
    /// First slide subtitle.
    #[validate(length(max = 300, message = "Ensure this field has no more than 300 characters."))]
    pub slide1_subtitle: String,
    /// Second slide headline.
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub slide2_title: String,
    /// Second slide subtitle.
    #[validate(length(max = 300, message = "Ensure this field has no more than 300 characters."))]
    pub slide2_subtitle: String,
    /// Third slide headline.
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub slide3_title: String,
    /// Third slide subtitle.
    #[validate(length(max = 300, message = "Ensure this field has no more than 300 characters."))]
    pub slide3_subtitle: String,
    /// Front desk phone number.
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub phone: String,
    /// Public contact email.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Link to a map of the resort.
    pub map_link: String,
    /// Facebook page.
    #[validate(
        length(max = 300, message = "Ensure this field has no more than 300 characters."),
        custom(function = "web_link")
    )]
    pub facebook: String,
    /// Instagram profile.
    #[validate(
        length(max = 300, message = "Ensure this field has no more than 300 characters."),
        custom(function = "web_link")
    )]
    pub instagram: String,
    /// Twitter profile.
    #[validate(
        length(max = 300, message = "Ensure this field has no more than 300 characters."),
        custom(function = "web_link")
    )]
    pub twitter: String,
    /// Last write; `None` until the record is first stored.
    #[serde(skip)]
    pub updated_at: Option<SystemTime>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            slide1_title: "Welcome to Silvermoon Park".into(),
            slide1_subtitle: "Where Luxury Meets Tranquility".into(),
            slide2_title: "Unforgettable Experiences".into(),
            slide2_subtitle: "Create Memories That Last Forever".into(),
            slide3_title: "Premium Accommodations".into(),
            slide3_subtitle: "Comfort & Elegance in Every Detail".into(),
            phone: "+91 98765 43210".into(),
            email: "info@silvermoonpark.com".into(),
            address: "Silvermoon Park Resort, Nature Valley, India".into(),
            map_link: "https://maps.google.com".into(),
            facebook: "https://facebook.com/silvermoonpark".into(),
            instagram: "https://instagram.com/silvermoonpark".into(),
            twitter: "https://twitter.com/silvermoonpark".into(),
            updated_at: None,
        }
    }
}

impl SiteContent {
    /// Runs the field rules.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` listing every failed rule.
    pub fn check(&self) -> Result<()> {
        Validate::validate(self).map_err(|e| Error::validation_failed(field_errors(&e)))
    }

    /// Returns a copy with the patch applied and validated.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the result breaks a field rule.
    pub fn patched(&self, patch: &SiteContentPatch) -> Result<Self> {
        let mut next = self.clone();
        for (target, value) in [
            (&mut next.slide1_title, &patch.slide1_title),
            (&mut next.slide1_subtitle, &patch.slide1_subtitle),
            (&mut next.slide2_title, &patch.slide2_title),
            (&mut next.slide2_subtitle, &patch.slide2_subtitle),
            (&mut next.slide3_title, &patch.slide3_title),
            (&mut next.slide3_subtitle, &patch.slide3_subtitle),
            (&mut next.phone, &patch.phone),
            (&mut next.email, &patch.email),
            (&mut next.address, &patch.address),
            (&mut next.map_link, &patch.map_link),
            (&mut next.facebook, &patch.facebook),
            (&mut next.instagram, &patch.instagram),
            (&mut next.twitter, &patch.twitter),
        ] {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        next.check()?;
        Ok(next)
    }
}

/// A partial update to the site content. `None` leaves a value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SiteContentPatch {
    pub slide1_title: Option<String>,
    pub slide1_subtitle: Option<String>,
    pub slide2_title: Option<String>,
    pub slide2_subtitle: Option<String>,
    pub slide3_title: Option<String>,
    pub slide3_subtitle: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub map_link: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let content = SiteContent::default();
        assert!(content.check().is_ok());
        assert_eq!(content.slide1_title, "Welcome to Silvermoon Park");
        assert!(content.updated_at.is_none());
    }

    #[test]
    fn test_patch_changes_only_named_fields() {
        let base = SiteContent::default();
        let patch = SiteContentPatch {
            phone: Some("+91 90000 11111".into()),
            twitter: Some(String::new()),
            ..Default::default()
        };
        let next = base.patched(&patch).unwrap();
        assert_eq!(next.phone, "+91 90000 11111");
        assert_eq!(next.twitter, "");
        assert_eq!(next.email, base.email);
    }

    #[test]
    fn test_patch_validation() {
        let patch = SiteContentPatch {
            email: Some("not-an-email".into()),
            instagram: Some("instagram.com/x".into()),
            ..Default::default()
        };
        match SiteContent::default().patched(&patch).unwrap_err() {
            Error::ValidationFailed { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["email", "instagram"]);
            }
            other => panic!("unexpected: {other}"),
        }
    }
}
