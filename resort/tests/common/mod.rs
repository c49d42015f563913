//! Common test utilities for integration tests.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::NaiveDate;
use resort::booking::{BudgetRange, EventBookingRequest, EventType, RoomBookingRequest};
use resort::{ContentFields, Database, DatabaseConfig, NewContent};
use tempfile::TempDir;

/// A database file in a fresh temporary directory.
///
/// The directory lives as long as the returned `TempDir`.
#[allow(dead_code)]
pub fn temp_database() -> (TempDir, PathBuf, Database) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("resort.db");
    let db = Database::open(DatabaseConfig::new(&path)).expect("failed to open database");
    (dir, path, db)
}

/// Opens a second connection to an existing database file.
#[allow(dead_code)]
pub fn reopen(path: &PathBuf) -> Database {
    let config = DatabaseConfig::new(path).with_busy_timeout(Duration::from_secs(30));
    Database::open(config).expect("failed to reopen database")
}

/// A fixed instant, 2024-01-01T00:00:00Z, plus `seconds`.
#[allow(dead_code)]
pub fn at(seconds: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_704_067_200 + seconds)
}

/// A date far enough ahead that "today" never reaches it.
pub fn future(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, month, day).expect("valid date")
}

/// A valid two-night room request for `name`.
#[allow(dead_code)]
pub fn room_request(name: &str) -> RoomBookingRequest {
    RoomBookingRequest::new(
        name,
        "+91 90000 00000",
        "guest@example.com",
        future(3, 10),
        future(3, 12),
        2,
    )
}

/// A valid corporate event request for `name`.
#[allow(dead_code)]
pub fn event_request(name: &str) -> EventBookingRequest {
    EventBookingRequest::new(
        name,
        "+91 90000 00001",
        "organizer@example.com",
        future(9, 1),
        EventType::Corporate,
        80,
        BudgetRange::From50kTo100k,
    )
}

/// An active explore card titled `title`.
#[allow(dead_code)]
pub fn explore_card(title: &str, order: u32) -> NewContent {
    NewContent::new(ContentFields::explore_card(
        title,
        "A short teaser",
        "The longer story",
        "/uploads/explore/card.jpg",
    ))
    .with_order(order)
}
