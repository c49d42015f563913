//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered; the
/// accessor methods supply the defaults.
///
/// # Examples
///
/// ```
/// use resort::config::{Config, UploadsConfig};
///
/// let config = Config {
///     uploads: Some(UploadsConfig {
///         directory: Some("/srv/resort/uploads".into()),
///         max_bytes: Some(2 * 1024 * 1024),
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.max_upload_bytes(), 2 * 1024 * 1024);
/// assert!(config.notifications_enabled());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for the database write lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,

    /// Upload storage settings.
    pub uploads: Option<UploadsConfig>,

    /// Booking notification settings.
    pub notifications: Option<NotificationsConfig>,
}

/// Default lock wait, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Default name used in notifications.
pub const DEFAULT_RESORT_NAME: &str = "Silvermoon Park";

impl Config {
    /// Lock wait in seconds, defaulting to [`DEFAULT_LOCK_WAIT_SECONDS`].
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Upload size limit, defaulting to 5 MiB.
    #[must_use]
    pub fn max_upload_bytes(&self) -> u64 {
        self.uploads
            .as_ref()
            .and_then(|u| u.max_bytes)
            .unwrap_or(crate::media::DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Whether booking notifications are produced. On unless disabled.
    #[must_use]
    pub fn notifications_enabled(&self) -> bool {
        self.notifications
            .as_ref()
            .and_then(|n| n.enabled)
            .unwrap_or(true)
    }

    /// Name used in notification text.
    #[must_use]
    pub fn resort_name(&self) -> &str {
        self.notifications
            .as_ref()
            .and_then(|n| n.resort_name.as_deref())
            .unwrap_or(DEFAULT_RESORT_NAME)
    }

    /// Where staff notifications are addressed, if configured.
    #[must_use]
    pub fn admin_email(&self) -> Option<&str> {
        self.notifications
            .as_ref()
            .and_then(|n| n.admin_email.as_deref())
    }
}

/// Upload storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct UploadsConfig {
    /// Root directory for uploaded images. Defaults to `<data_dir>/uploads`.
    pub directory: Option<String>,

    /// Largest accepted upload in bytes.
    pub max_bytes: Option<u64>,
}

/// Booking notification settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Whether notifications are produced at all.
    pub enabled: Option<bool>,

    /// Name used to sign messages.
    pub resort_name: Option<String>,

    /// Staff address for new-booking notifications.
    pub admin_email: Option<String>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use resort::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(Error::Validation {
                field: "output_format".into(),
                message: format!("Invalid output format '{other}' (expected table, json, csv or tsv)"),
            }),
        }
    }
}
