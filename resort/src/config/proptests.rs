//! Property-based tests for configuration merging.

use super::merger::ConfigMerger;
use super::schema::{Config, NotificationsConfig, OutputFormat, UploadsConfig};
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Tsv),
    ]
}

fn uploads_strategy() -> impl Strategy<Value = UploadsConfig> {
    (
        prop::option::of("/[a-z]{1,12}"),
        prop::option::of(1u64..=100 * 1024 * 1024),
    )
        .prop_map(|(directory, max_bytes)| UploadsConfig {
            directory,
            max_bytes,
        })
}

fn notifications_strategy() -> impl Strategy<Value = NotificationsConfig> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of("[A-Z][a-z]{2,12}"),
        prop::option::of("[a-z]{1,8}@[a-z]{1,8}\\.com"),
    )
        .prop_map(|(enabled, resort_name, admin_email)| NotificationsConfig {
            enabled,
            resort_name,
            admin_email,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(1u64..=600),
        prop::option::of(output_format_strategy()),
        prop::option::of(uploads_strategy()),
        prop::option::of(notifications_strategy()),
    )
        .prop_map(
            |(disable_autoinit, lock_wait, output_format, uploads, notifications)| Config {
                disable_autoinit,
                maximum_lock_wait_seconds: lock_wait,
                output_format,
                uploads,
                notifications,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn merge_with_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    #[test]
    fn higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(
            merged.disable_autoinit,
            high.disable_autoinit.or(low.disable_autoinit)
        );
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            high.maximum_lock_wait_seconds.or(low.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));

        let high_bytes = high.uploads.as_ref().and_then(|u| u.max_bytes);
        let low_bytes = low.uploads.as_ref().and_then(|u| u.max_bytes);
        prop_assert_eq!(
            merged.uploads.as_ref().and_then(|u| u.max_bytes),
            high_bytes.or(low_bytes)
        );

        let high_email = high.notifications.as_ref().and_then(|n| n.admin_email.clone());
        let low_email = low.notifications.as_ref().and_then(|n| n.admin_email.clone());
        prop_assert_eq!(merged.admin_email().map(String::from), high_email.or(low_email));
    }

    #[test]
    fn merge_is_idempotent(base in config_strategy(), layer in config_strategy()) {
        let mut once = base;
        ConfigMerger::merge_into(&mut once, &layer);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &layer);
        prop_assert_eq!(once, twice);
    }
}
