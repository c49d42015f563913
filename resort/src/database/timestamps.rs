//! Conversions between `SystemTime` and the integers stored in `SQLite`.

// Timestamps before 1970 or after year 292 million are not representable
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use rusqlite::types::Type;

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
pub(crate) fn to_unix_secs(time: SystemTime) -> Result<i64> {
    since_epoch(time).map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
pub(crate) fn from_unix_secs(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs.max(0) as u64)
}

/// Converts a `SystemTime` to Unix epoch milliseconds.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
pub(crate) fn to_unix_millis(time: SystemTime) -> Result<i64> {
    since_epoch(time).map(|d| d.as_millis() as i64)
}

/// Converts Unix epoch milliseconds to a `SystemTime`.
pub(crate) fn from_unix_millis(millis: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_millis(millis.max(0) as u64)
}

fn since_epoch(time: SystemTime) -> Result<Duration> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "timestamp".into(),
            message: format!("Invalid timestamp: {e}"),
        })
}

/// Formats a calendar date for storage.
pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Reads a stored calendar date from column `idx`.
pub(crate) fn date_from_sql(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a text column and parses it with `FromStr`.
pub(crate) fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = Error>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
