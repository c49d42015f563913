//! Environment variable handling for configuration overrides.
//!
//! `RESORT_*` variables override values from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use resort::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric limit or an invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("RESORT_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("RESORT_DISABLE_AUTOINIT", &val)?);
        }

        if let Ok(seconds) = env::var("RESORT_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds = Some(Self::parse_number(
                "RESORT_MAXIMUM_LOCK_WAIT_SECONDS",
                &seconds,
            )?);
        }

        if let Ok(format) = env::var("RESORT_OUTPUT_FORMAT") {
            config.output_format = Some(format.parse::<OutputFormat>().map_err(|_| {
                Error::Validation {
                    field: "RESORT_OUTPUT_FORMAT".into(),
                    message: format!("Invalid output format: '{format}'"),
                }
            })?);
        }

        Self::apply_upload_overrides(config)?;
        Self::apply_notification_overrides(config)?;

        Ok(())
    }

    fn apply_upload_overrides(config: &mut Config) -> Result<()> {
        let mut uploads = config.uploads.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(dir) = env::var("RESORT_UPLOADS_DIR") {
            uploads.directory = Some(dir);
            modified = true;
        }

        if let Ok(bytes) = env::var("RESORT_MAX_UPLOAD_BYTES") {
            uploads.max_bytes = Some(Self::parse_number("RESORT_MAX_UPLOAD_BYTES", &bytes)?);
            modified = true;
        }

        if modified {
            config.uploads = Some(uploads);
        }

        Ok(())
    }

    fn apply_notification_overrides(config: &mut Config) -> Result<()> {
        let mut notifications = config.notifications.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("RESORT_NOTIFICATIONS") {
            notifications.enabled = Some(Self::parse_bool("RESORT_NOTIFICATIONS", &val)?);
            modified = true;
        }

        if let Ok(email) = env::var("RESORT_ADMIN_EMAIL") {
            notifications.admin_email = Some(email);
            modified = true;
        }

        if let Ok(name) = env::var("RESORT_NAME") {
            notifications.resort_name = Some(name);
            modified = true;
        }

        if modified {
            config.notifications = Some(notifications);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number(field: &str, s: &str) -> Result<u64> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: "Must be a positive integer".into(),
        })
    }
}
