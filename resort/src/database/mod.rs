//! SQLite persistence for bookings, content collections and site content.
//!
//! [`Database`] owns one connection. Its static helpers take a
//! `&rusqlite::Connection` so they run unchanged on the plain connection or
//! inside a transaction from [`Database::begin_transaction`]; the `&mut self`
//! helpers open their own transaction.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::SystemTime;
//! use chrono::NaiveDate;
//! use resort::database::{Database, DatabaseConfig};
//! use resort::booking::RoomBookingRequest;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/resort.db")).unwrap();
//!
//! let request = RoomBookingRequest::new(
//!     "Asha Rao",
//!     "+91 90000 00000",
//!     "asha@example.com",
//!     NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
//!     NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
//!     2,
//! );
//! let booking = db.create_room_booking(&request, SystemTime::now()).unwrap();
//! println!("{}", booking.code);
//! ```

mod bookings;
mod config;
mod connection;
mod content;
pub mod migrations;
mod schema;
mod site_content;
mod timestamps;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig,
    DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;
pub use rusqlite::{Connection, Transaction};
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
