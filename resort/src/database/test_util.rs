//! Shared test utilities for database unit tests.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::booking::{BudgetRange, EventBookingRequest, EventType, RoomBookingRequest};
use crate::database::{Database, DatabaseConfig};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Far enough ahead that "today" never catches up with it.
pub fn future_date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2099, month, day).unwrap()
}

/// A valid two-night single-room request.
#[must_use]
pub fn sample_room_request() -> RoomBookingRequest {
    RoomBookingRequest::new(
        "Asha Rao",
        "+91 90000 00000",
        "asha@example.com",
        future_date(3, 10),
        future_date(3, 12),
        2,
    )
}

/// A valid wedding enquiry.
#[must_use]
pub fn sample_event_request() -> EventBookingRequest {
    EventBookingRequest::new(
        "Vikram Menon",
        "+91 98888 00000",
        "vikram@example.com",
        future_date(12, 1),
        EventType::Wedding,
        150,
        BudgetRange::From100kTo200k,
    )
}
