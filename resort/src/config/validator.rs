//! Configuration validation.

use crate::config::schema::{Config, NotificationsConfig, UploadsConfig};
use crate::error::{Error, Result};

/// Largest upload limit a configuration may set: 100 MiB.
pub const MAX_UPLOAD_LIMIT: u64 = 100 * 1024 * 1024;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use resort::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref uploads) = config.uploads {
            Self::validate_uploads(uploads)?;
        }

        if let Some(ref notifications) = config.notifications {
            Self::validate_notifications(notifications)?;
        }

        Ok(())
    }

    fn validate_uploads(uploads: &UploadsConfig) -> Result<()> {
        if let Some(max) = uploads.max_bytes {
            if max == 0 || max > MAX_UPLOAD_LIMIT {
                return Err(Error::Validation {
                    field: "uploads.max_bytes".into(),
                    message: format!("Must be between 1 and {MAX_UPLOAD_LIMIT}"),
                });
            }
        }

        if let Some(ref dir) = uploads.directory {
            Self::validate_text("uploads.directory", dir)?;
        }

        Ok(())
    }

    fn validate_notifications(notifications: &NotificationsConfig) -> Result<()> {
        if let Some(ref name) = notifications.resort_name {
            Self::validate_text("notifications.resort_name", name)?;
        }

        if let Some(ref email) = notifications.admin_email {
            let trimmed = email.trim();
            let well_formed = trimmed
                .split_once('@')
                .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
            if !well_formed {
                return Err(Error::Validation {
                    field: "notifications.admin_email".into(),
                    message: format!("Not an email address: '{email}'"),
                });
            }
        }

        Ok(())
    }

    /// Non-empty after trimming, no null bytes, at most 255 characters.
    fn validate_text(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if trimmed.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        if trimmed.chars().count() > 255 {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot exceed 255 characters".into(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_config() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_lock_wait_rejected() {
        let config = Config {
            maximum_lock_wait_seconds: Some(0),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "maximum_lock_wait_seconds"
        );
    }

    #[test]
    fn test_upload_limit_bounds() {
        for bad in [0, MAX_UPLOAD_LIMIT + 1] {
            let config = Config {
                uploads: Some(UploadsConfig {
                    directory: None,
                    max_bytes: Some(bad),
                }),
                ..Default::default()
            };
            assert_eq!(field_of(ConfigValidator::validate(&config)), "uploads.max_bytes");
        }

        let config = Config {
            uploads: Some(UploadsConfig {
                directory: Some("/srv/uploads".into()),
                max_bytes: Some(MAX_UPLOAD_LIMIT),
            }),
            ..Default::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_blank_resort_name_rejected() {
        let config = Config {
            notifications: Some(NotificationsConfig {
                resort_name: Some("   ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            field_of(ConfigValidator::validate(&config)),
            "notifications.resort_name"
        );
    }

    #[test]
    fn test_admin_email_shape() {
        for bad in ["desk", "@example.com", "desk@localhost"] {
            let config = Config {
                notifications: Some(NotificationsConfig {
                    admin_email: Some(bad.into()),
                    ..Default::default()
                }),
                ..Default::default()
            };
            assert_eq!(
                field_of(ConfigValidator::validate(&config)),
                "notifications.admin_email",
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_text() {
        assert!(ConfigValidator::validate_text("f", "Lakeview").is_ok());
        assert!(ConfigValidator::validate_text("f", "a\0b").is_err());
        assert!(ConfigValidator::validate_text("f", &"x".repeat(256)).is_err());
    }
}
