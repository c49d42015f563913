//! Sequential booking code allocation.
//!
//! The next code of a kind is one past the highest stored code of that kind
//! (a max-scan; there is no separate counter to keep consistent). Called on a
//! plain connection the scan and a later insert can race with another
//! writer, so every allocating path in this crate runs the scan and the insert
//! inside one IMMEDIATE transaction. The UNIQUE constraint on `booking_code`
//! backs this up: if the two ever did race, the second insert fails instead
//! of duplicating a code.

use std::time::SystemTime;

use rusqlite::Connection;

use super::{BookingCode, BookingKind, EventBooking, EventBookingRequest, RoomBooking, RoomBookingRequest};
use crate::database::Database;
use crate::error::Result;

/// Derives booking codes from the stored sequence.
pub struct SequenceAllocator;

impl SequenceAllocator {
    /// Returns the code the next booking of `kind` would receive.
    ///
    /// # Errors
    ///
    /// Returns `MalformedSequenceState` if the highest stored code cannot be
    /// parsed. The allocator never guesses a number in that case.
    /// Returns `SequenceExhausted` if the highest code is already the last
    /// ten-digit number.
    ///
    /// # Examples
    ///
    /// ```
    /// use rusqlite::Connection;
    /// use resort::database::migrations::initialize_schema;
    /// use resort::{BookingKind, SequenceAllocator};
    ///
    /// let conn = Connection::open_in_memory().unwrap();
    /// initialize_schema(&conn).unwrap();
    ///
    /// let code = SequenceAllocator::next_code(&conn, BookingKind::Room).unwrap();
    /// assert_eq!(code.to_string(), "R0000000001");
    /// ```
    pub fn next_code(conn: &Connection, kind: BookingKind) -> Result<BookingCode> {
        match Database::max_booking_code(conn, kind)? {
            None => Ok(BookingCode::first(kind)),
            Some(raw) => BookingCode::parse(kind, &raw)?.next(),
        }
    }

    /// Allocates a room code and inserts the booking under it.
    ///
    /// `conn` should be an IMMEDIATE transaction; see the module docs.
    ///
    /// # Errors
    ///
    /// Returns allocation errors from [`Self::next_code`] or a database error.
    pub fn book_room(
        conn: &Connection,
        request: &RoomBookingRequest,
        now: SystemTime,
    ) -> Result<RoomBooking> {
        let code = Self::next_code(conn, BookingKind::Room)?;
        let booking = Database::insert_room_booking(conn, code, request, now)?;
        log::info!("recorded room booking {code} for {}", request.full_name);
        Ok(booking)
    }

    /// Allocates an event code and inserts the booking under it.
    ///
    /// # Errors
    ///
    /// Returns allocation errors from [`Self::next_code`] or a database error.
    pub fn book_event(
        conn: &Connection,
        request: &EventBookingRequest,
        now: SystemTime,
    ) -> Result<EventBooking> {
        let code = Self::next_code(conn, BookingKind::Event)?;
        let booking = Database::insert_event_booking(conn, code, request, now)?;
        log::info!("recorded event booking {code} for {}", request.full_name);
        Ok(booking)
    }
}
