//! Booking operation planning.

use rusqlite::Connection;

use crate::booking::{
    BookingKind, BookingValidator, EventBookingRequest, RoomBookingRequest, SequenceAllocator,
};
use crate::error::Result;

use super::plan::{OperationPlan, PlanAction};

/// A booking waiting to be planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRequest {
    /// A room stay.
    Room(RoomBookingRequest),
    /// An event.
    Event(EventBookingRequest),
}

impl BookingRequest {
    /// The booking table this request will land in.
    #[must_use]
    pub const fn kind(&self) -> BookingKind {
        match self {
            Self::Room(_) => BookingKind::Room,
            Self::Event(_) => BookingKind::Event,
        }
    }
}

/// Plans the creation of a booking.
///
/// Planning validates the request and previews the code the booking would
/// get. The executor allocates the code again when it runs, so the preview
/// is only exact when planning and execution share a transaction.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rusqlite::Connection;
/// use resort::booking::{BookingValidator, RoomBookingRequest};
/// use resort::database::migrations::initialize_schema;
/// use resort::operations::BookingPlan;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
///
/// let day = |d| NaiveDate::from_ymd_opt(2030, 6, d).unwrap();
/// let request = RoomBookingRequest::new("Asha Rao", "9000000000", "asha@example.com", day(10), day(12), 2);
/// let plan = BookingPlan::room(request)
///     .with_validator(BookingValidator::new(day(1)))
///     .build_plan(&conn)
///     .unwrap();
/// assert_eq!(plan.description, "Book room R0000000001 for Asha Rao");
/// ```
#[derive(Debug, Clone)]
pub struct BookingPlan {
    request: BookingRequest,
    validator: BookingValidator,
}

impl BookingPlan {
    /// Plans a room booking, validated against today's date.
    #[must_use]
    pub fn room(request: RoomBookingRequest) -> Self {
        Self::new(BookingRequest::Room(request))
    }

    /// Plans an event booking, validated against today's date.
    #[must_use]
    pub fn event(request: EventBookingRequest) -> Self {
        Self::new(BookingRequest::Event(request))
    }

    /// Plans any booking request.
    #[must_use]
    pub fn new(request: BookingRequest) -> Self {
        Self {
            request,
            validator: BookingValidator::for_today(),
        }
    }

    /// Validates with `validator` instead of today's date.
    #[must_use]
    pub const fn with_validator(mut self, validator: BookingValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` if the request is rejected, or the
    /// allocation errors of [`SequenceAllocator::next_code`].
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        match &self.request {
            BookingRequest::Room(request) => {
                self.validator.validate_room(request)?;
                let code = SequenceAllocator::next_code(conn, BookingKind::Room)?;
                let mut plan = OperationPlan::new(format!(
                    "Book room {code} for {}",
                    request.full_name.trim()
                ))
                .add_action(PlanAction::CreateRoomBooking(request.clone()));

                if request.num_rooms > 1 && request.room_type.is_some() {
                    plan = plan.add_warning(
                        "Room type is ignored for multi-room bookings; the breakdown applies",
                    );
                }
                if request.check_in == self.validator.today() {
                    plan = plan.add_warning("Guest arrives today");
                }
                Ok(plan)
            }
            BookingRequest::Event(request) => {
                self.validator.validate_event(request)?;
                let code = SequenceAllocator::next_code(conn, BookingKind::Event)?;
                let mut plan = OperationPlan::new(format!(
                    "Book {} event {code} for {}",
                    request.event_type.label().to_lowercase(),
                    request.full_name.trim()
                ))
                .add_action(PlanAction::CreateEventBooking(request.clone()));

                if request.event_date == self.validator.today() {
                    plan = plan.add_warning("Event takes place today");
                }
                Ok(plan)
            }
        }
    }
}
