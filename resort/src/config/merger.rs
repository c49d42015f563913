//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, NotificationsConfig, UploadsConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use resort::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Nested sections: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_uploads) = source.uploads {
            target.uploads = Some(match &target.uploads {
                Some(target_uploads) => Self::merge_uploads(target_uploads, source_uploads),
                None => source_uploads.clone(),
            });
        }

        if let Some(ref source_notifications) = source.notifications {
            target.notifications = Some(match &target.notifications {
                Some(target_notifications) => {
                    Self::merge_notifications(target_notifications, source_notifications)
                }
                None => source_notifications.clone(),
            });
        }
    }

    fn merge_uploads(target: &UploadsConfig, source: &UploadsConfig) -> UploadsConfig {
        UploadsConfig {
            directory: source.directory.clone().or_else(|| target.directory.clone()),
            max_bytes: source.max_bytes.or(target.max_bytes),
        }
    }

    fn merge_notifications(
        target: &NotificationsConfig,
        source: &NotificationsConfig,
    ) -> NotificationsConfig {
        NotificationsConfig {
            enabled: source.enabled.or(target.enabled),
            resort_name: source
                .resort_name
                .clone()
                .or_else(|| target.resort_name.clone()),
            admin_email: source
                .admin_email
                .clone()
                .or_else(|| target.admin_email.clone()),
        }
    }
}
