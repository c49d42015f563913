//! Booking storage.
//!
//! Static helpers take a `&Connection` so they run equally well on a plain
//! connection or inside a caller-owned transaction. The `&mut self` methods
//! open their own IMMEDIATE transaction.

use std::time::SystemTime;

use rusqlite::{params, Connection, OptionalExtension};

use crate::booking::{
    Booking, BookingCode, BookingKind, BookingRef, BookingStatus, EventBooking,
    EventBookingRequest, RoomBooking, RoomBookingRequest, RoomBreakdown, RoomType,
    SequenceAllocator,
};
use crate::error::{Error, Result};

use super::connection::Database;
use super::timestamps::{date_from_sql, date_to_sql, from_unix_secs, parse_column, to_unix_secs};

const ROOM_COLUMNS: &str = "id, booking_code, status, created_at, full_name, phone, email, \
     check_in, check_out, room_type, guests, children, num_rooms, cottage_count, suite_count, \
     deluxe_count, family_count, special_requests, booked_by_admin";

const EVENT_COLUMNS: &str = "id, booking_code, status, created_at, full_name, phone, email, \
     event_date, event_type, expected_guests, budget_range, notes, booked_by_admin";

const INSERT_ROOM_BOOKING: &str = r"
    INSERT INTO room_bookings
    (booking_code, status, created_at, full_name, phone, email, check_in, check_out,
     room_type, guests, children, num_rooms, cottage_count, suite_count, deluxe_count,
     family_count, special_requests, booked_by_admin)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
";

const INSERT_EVENT_BOOKING: &str = r"
    INSERT INTO event_bookings
    (booking_code, status, created_at, full_name, phone, email, event_date, event_type,
     expected_guests, budget_range, notes, booked_by_admin)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
";

fn row_to_room_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomBooking> {
    let raw_code: String = row.get(1)?;
    let code = BookingCode::parse(BookingKind::Room, &raw_code).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let room_type: Option<String> = row.get(9)?;
    let room_type = room_type
        .map(|s| s.parse::<RoomType>())
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(RoomBooking {
        id: row.get(0)?,
        code,
        status: parse_column(row, 2)?,
        created_at: from_unix_secs(row.get(3)?),
        details: RoomBookingRequest {
            full_name: row.get(4)?,
            phone: row.get(5)?,
            email: row.get(6)?,
            check_in: date_from_sql(row, 7)?,
            check_out: date_from_sql(row, 8)?,
            room_type,
            guests: row.get(10)?,
            children: row.get(11)?,
            num_rooms: row.get(12)?,
            breakdown: RoomBreakdown {
                cottage: row.get(13)?,
                suite: row.get(14)?,
                deluxe: row.get(15)?,
                family: row.get(16)?,
            },
            special_requests: row.get(17)?,
            booked_by_admin: row.get(18)?,
        },
    })
}

fn row_to_event_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventBooking> {
    let raw_code: String = row.get(1)?;
    let code = BookingCode::parse(BookingKind::Event, &raw_code).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(EventBooking {
        id: row.get(0)?,
        code,
        status: parse_column(row, 2)?,
        created_at: from_unix_secs(row.get(3)?),
        details: EventBookingRequest {
            full_name: row.get(4)?,
            phone: row.get(5)?,
            email: row.get(6)?,
            event_date: date_from_sql(row, 7)?,
            event_type: parse_column(row, 8)?,
            expected_guests: row.get(9)?,
            budget_range: parse_column(row, 10)?,
            notes: row.get(11)?,
            booked_by_admin: row.get(12)?,
        },
    })
}

fn row_to_booking(kind: BookingKind, row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    match kind {
        BookingKind::Room => row_to_room_booking(row).map(Booking::Room),
        BookingKind::Event => row_to_event_booking(row).map(Booking::Event),
    }
}

/// Decoding errors carry the domain error that caused them; a stored code
/// that no longer parses is reported as `MalformedSequenceState`.
fn decode_error(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::FromSqlConversionFailure(column, ty, cause) => {
            match cause.downcast::<Error>() {
                Ok(inner) => *inner,
                Err(cause) => {
                    Error::Database(rusqlite::Error::FromSqlConversionFailure(column, ty, cause))
                }
            }
        }
        other => Error::Database(other),
    }
}

const fn columns(kind: BookingKind) -> &'static str {
    match kind {
        BookingKind::Room => ROOM_COLUMNS,
        BookingKind::Event => EVENT_COLUMNS,
    }
}

impl Database {
    /// Returns the highest stored booking code of a kind, unparsed.
    ///
    /// Codes are fixed-width, so the lexicographic maximum is the numeric
    /// maximum. The UNIQUE index on `booking_code` makes this a single seek.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn max_booking_code(conn: &Connection, kind: BookingKind) -> Result<Option<String>> {
        let sql = format!(
            "SELECT booking_code FROM {} ORDER BY booking_code DESC LIMIT 1",
            kind.table()
        );
        Ok(conn
            .query_row(&sql, [], |row| row.get::<_, String>(0))
            .optional()?)
    }

    /// Inserts a room booking under an already allocated code.
    ///
    /// Intended for use inside the transaction that allocated `code`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when `code` is
    /// already taken.
    pub fn insert_room_booking(
        conn: &Connection,
        code: BookingCode,
        request: &RoomBookingRequest,
        now: SystemTime,
    ) -> Result<RoomBooking> {
        let created_secs = to_unix_secs(now)?;
        conn.execute(
            INSERT_ROOM_BOOKING,
            params![
                code.to_string(),
                BookingStatus::Pending.as_str(),
                created_secs,
                request.full_name,
                request.phone,
                request.email,
                date_to_sql(request.check_in),
                date_to_sql(request.check_out),
                request.room_type.map(|t| t.as_str()),
                request.guests,
                request.children,
                request.num_rooms,
                request.breakdown.cottage,
                request.breakdown.suite,
                request.breakdown.deluxe,
                request.breakdown.family,
                request.special_requests,
                request.booked_by_admin,
            ],
        )?;

        Ok(RoomBooking {
            id: conn.last_insert_rowid(),
            code,
            status: BookingStatus::Pending,
            created_at: from_unix_secs(created_secs),
            details: request.clone(),
        })
    }

    /// Inserts an event booking under an already allocated code.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when `code` is
    /// already taken.
    pub fn insert_event_booking(
        conn: &Connection,
        code: BookingCode,
        request: &EventBookingRequest,
        now: SystemTime,
    ) -> Result<EventBooking> {
        let created_secs = to_unix_secs(now)?;
        conn.execute(
            INSERT_EVENT_BOOKING,
            params![
                code.to_string(),
                BookingStatus::Pending.as_str(),
                created_secs,
                request.full_name,
                request.phone,
                request.email,
                date_to_sql(request.event_date),
                request.event_type.as_str(),
                request.expected_guests,
                request.budget_range.as_str(),
                request.notes,
                request.booked_by_admin,
            ],
        )?;

        Ok(EventBooking {
            id: conn.last_insert_rowid(),
            code,
            status: BookingStatus::Pending,
            created_at: from_unix_secs(created_secs),
            details: request.clone(),
        })
    }

    /// Allocates the next room code and records the booking atomically.
    ///
    /// The request is stored as given; validate it first.
    ///
    /// # Errors
    ///
    /// Returns `LockTimeout` if the write lock cannot be taken,
    /// `MalformedSequenceState` if the stored sequence is unreadable, or a
    /// database error.
    pub fn create_room_booking(
        &mut self,
        request: &RoomBookingRequest,
        now: SystemTime,
    ) -> Result<RoomBooking> {
        let tx = self.begin_transaction()?;
        let booking = SequenceAllocator::book_room(&tx, request, now)?;
        tx.commit()?;
        Ok(booking)
    }

    /// Allocates the next event code and records the booking atomically.
    ///
    /// # Errors
    ///
    /// See [`Database::create_room_booking`].
    pub fn create_event_booking(
        &mut self,
        request: &EventBookingRequest,
        now: SystemTime,
    ) -> Result<EventBooking> {
        let tx = self.begin_transaction()?;
        let booking = SequenceAllocator::book_event(&tx, request, now)?;
        tx.commit()?;
        Ok(booking)
    }

    /// Looks up a booking by identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_booking(conn: &Connection, kind: BookingKind, id: i64) -> Result<Option<Booking>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            columns(kind),
            kind.table()
        );
        conn.query_row(&sql, [id], |row| row_to_booking(kind, row))
            .optional()
            .map_err(decode_error)
    }

    /// Looks up a booking by its code. The kind comes from the code prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn find_booking_by_code(conn: &Connection, code: BookingCode) -> Result<Option<Booking>> {
        let kind = code.kind();
        let sql = format!(
            "SELECT {} FROM {} WHERE booking_code = ?",
            columns(kind),
            kind.table()
        );
        conn.query_row(&sql, [code.to_string()], |row| row_to_booking(kind, row))
            .optional()
            .map_err(decode_error)
    }

    /// Resolves a booking reference within a kind.
    ///
    /// A code of the other kind never matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn resolve_booking(
        conn: &Connection,
        kind: BookingKind,
        reference: BookingRef,
    ) -> Result<Option<Booking>> {
        match reference {
            BookingRef::Id(id) => Self::get_booking(conn, kind, id),
            BookingRef::Code(code) if code.kind() == kind => Self::find_booking_by_code(conn, code),
            BookingRef::Code(_) => Ok(None),
        }
    }

    /// Lists bookings of a kind, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded.
    pub fn list_bookings(
        conn: &Connection,
        kind: BookingKind,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE (?1 IS NULL OR status = ?1) ORDER BY created_at DESC, id DESC",
            columns(kind),
            kind.table()
        );
        let mut stmt = conn.prepare(&sql)?;
        let bookings = stmt
            .query_map([status.map(BookingStatus::as_str)], |row| {
                row_to_booking(kind, row)
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()
            .map_err(decode_error)?;
        Ok(bookings)
    }

    /// Sets the status of a booking. Returns false if no such booking exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_booking_status(
        conn: &Connection,
        kind: BookingKind,
        id: i64,
        status: BookingStatus,
    ) -> Result<bool> {
        let sql = format!("UPDATE {} SET status = ? WHERE id = ?", kind.table());
        let rows = conn.execute(&sql, params![status.as_str(), id])?;
        Ok(rows > 0)
    }

    /// Counts bookings of a kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_bookings(conn: &Connection, kind: BookingKind) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        Ok(conn.query_row(&sql, [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BudgetRange, EventType};
    use crate::database::test_util::{create_test_database, sample_event_request, sample_room_request};
    use crate::Error;

    #[test]
    fn test_malformed_stored_code_is_reported_on_read() {
        let mut db = create_test_database();
        let booking = db
            .create_room_booking(&sample_room_request(), SystemTime::now())
            .unwrap();
        db.connection()
            .execute(
                "UPDATE room_bookings SET booking_code = 'R00000000x1' WHERE id = ?",
                [booking.id],
            )
            .unwrap();

        let conn = db.connection();
        let err = Database::get_booking(conn, BookingKind::Room, booking.id).unwrap_err();
        assert!(matches!(err, Error::MalformedSequenceState { kind: BookingKind::Room, .. }));
        let err = Database::list_bookings(conn, BookingKind::Room, None).unwrap_err();
        assert!(matches!(err, Error::MalformedSequenceState { .. }));
        assert!(err.to_string().contains("R00000000x1"));
    }

    #[test]
    fn test_create_room_booking_assigns_first_code() {
        let mut db = create_test_database();
        let booking = db
            .create_room_booking(&sample_room_request(), SystemTime::now())
            .unwrap();
        assert_eq!(booking.code.to_string(), "R0000000001");
        assert_eq!(booking.status, BookingStatus::Pending);

        let stored = Database::get_booking(db.connection(), BookingKind::Room, booking.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored, Booking::Room(booking));
    }

    #[test]
    fn test_room_booking_round_trips_all_fields() {
        let mut db = create_test_database();
        let request = sample_room_request()
            .with_room_type(RoomType::Family)
            .with_children(2)
            .with_rooms(
                2,
                RoomBreakdown {
                    family: 1,
                    suite: 1,
                    ..Default::default()
                },
            )
            .with_special_requests("Cot for infant")
            .booked_by_admin(true);
        let created = db.create_room_booking(&request, SystemTime::now()).unwrap();

        match Database::get_booking(db.connection(), BookingKind::Room, created.id)
            .unwrap()
            .unwrap()
        {
            Booking::Room(stored) => assert_eq!(stored.details, request),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_event_booking_round_trips() {
        let mut db = create_test_database();
        let request = sample_event_request().with_notes("Vegetarian menu");
        let created = db
            .create_event_booking(&request, SystemTime::now())
            .unwrap();
        assert_eq!(created.code.to_string(), "E0000000001");

        let found = Database::find_booking_by_code(db.connection(), created.code)
            .unwrap()
            .unwrap();
        match found {
            Booking::Event(stored) => {
                assert_eq!(stored.details.event_type, EventType::Wedding);
                assert_eq!(stored.details.budget_range, BudgetRange::From100kTo200k);
                assert_eq!(stored.details.notes, "Vegetarian menu");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_max_booking_code() {
        let mut db = create_test_database();
        assert_eq!(
            Database::max_booking_code(db.connection(), BookingKind::Room).unwrap(),
            None
        );
        for _ in 0..3 {
            db.create_room_booking(&sample_room_request(), SystemTime::now())
                .unwrap();
        }
        assert_eq!(
            Database::max_booking_code(db.connection(), BookingKind::Room)
                .unwrap()
                .as_deref(),
            Some("R0000000003")
        );
        assert_eq!(
            Database::max_booking_code(db.connection(), BookingKind::Event).unwrap(),
            None
        );
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let db = create_test_database();
        let code = BookingCode::first(BookingKind::Room);
        Database::insert_room_booking(db.connection(), code, &sample_room_request(), SystemTime::now())
            .unwrap();
        let err = Database::insert_room_booking(
            db.connection(),
            code,
            &sample_room_request(),
            SystemTime::now(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_resolve_booking() {
        let mut db = create_test_database();
        let room = db
            .create_room_booking(&sample_room_request(), SystemTime::now())
            .unwrap();
        let conn = db.connection();

        let by_id = Database::resolve_booking(conn, BookingKind::Room, BookingRef::Id(room.id))
            .unwrap();
        assert!(by_id.is_some());

        let by_code =
            Database::resolve_booking(conn, BookingKind::Room, BookingRef::Code(room.code))
                .unwrap();
        assert_eq!(by_code.map(|b| b.id()), Some(room.id));

        // A room code never resolves among events
        let wrong_kind =
            Database::resolve_booking(conn, BookingKind::Event, BookingRef::Code(room.code))
                .unwrap();
        assert!(wrong_kind.is_none());

        assert!(Database::resolve_booking(conn, BookingKind::Room, BookingRef::Id(999))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_list_and_status() {
        let mut db = create_test_database();
        let now = SystemTime::now();
        let first = db.create_room_booking(&sample_room_request(), now).unwrap();
        let second = db.create_room_booking(&sample_room_request(), now).unwrap();

        assert!(Database::set_booking_status(
            db.connection(),
            BookingKind::Room,
            first.id,
            BookingStatus::Confirmed
        )
        .unwrap());
        assert!(!Database::set_booking_status(
            db.connection(),
            BookingKind::Room,
            999,
            BookingStatus::Confirmed
        )
        .unwrap());

        // Newest first; same second falls back to id
        let all = Database::list_bookings(db.connection(), BookingKind::Room, None).unwrap();
        let ids: Vec<i64> = all.iter().map(Booking::id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let confirmed = Database::list_bookings(
            db.connection(),
            BookingKind::Room,
            Some(BookingStatus::Confirmed),
        )
        .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].status(), BookingStatus::Confirmed);

        assert_eq!(
            Database::count_bookings(db.connection(), BookingKind::Room).unwrap(),
            2
        );
    }
}
