//! Booking request validation.
//!
//! Single-field rules live on the request types as `validator` attributes.
//! [`BookingValidator`] runs those and adds the rules that need more than one
//! field or the current date. Every failure is collected, so a caller sees
//! all problems with a request at once.

use std::borrow::Cow;

use chrono::NaiveDate;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{EventBookingRequest, RoomBookingRequest};
use crate::error::{Error, FieldError, Result};

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn non_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "This field may not be blank."));
    }
    Ok(())
}

pub(crate) fn validate_guests(value: u32) -> std::result::Result<(), ValidationError> {
    match value {
        0 => Err(invalid("range", "At least 1 guest is required.")),
        21.. => Err(invalid("range", "Maximum 20 guests per booking.")),
        _ => Ok(()),
    }
}

/// Most rooms a single booking may hold, in total and per room type.
pub const MAX_ROOMS: u32 = 10;

pub(crate) fn validate_num_rooms(value: u32) -> std::result::Result<(), ValidationError> {
    match value {
        0 => Err(invalid("range", "At least 1 room is required.")),
        11.. => Err(invalid("range", "Maximum 10 rooms per booking.")),
        _ => Ok(()),
    }
}

pub(crate) fn validate_expected_guests(value: u32) -> std::result::Result<(), ValidationError> {
    match value {
        0 => Err(invalid("range", "At least 1 guest is required.")),
        1001.. => Err(invalid("range", "Maximum 1000 guests per event.")),
        _ => Ok(()),
    }
}

/// Flattens `validator` output into field errors.
pub(crate) fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map_or_else(|| e.code.to_string(), ToString::to_string);
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}

/// Validates booking requests against a fixed "today".
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use resort::booking::{BookingValidator, RoomBookingRequest};
///
/// let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
/// let validator = BookingValidator::new(today);
///
/// let request = RoomBookingRequest::new(
///     "Asha Rao",
///     "+91 90000 00000",
///     "asha@example.com",
///     NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2030, 1, 7).unwrap(),
///     2,
/// );
/// assert!(validator.validate_room(&request).is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BookingValidator {
    today: NaiveDate,
}

impl BookingValidator {
    /// Creates a validator that treats `today` as the current date.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a validator using the local calendar date.
    #[must_use]
    pub fn for_today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// The date this validator considers to be today.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Validates a room booking request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` listing every failed rule.
    pub fn validate_room(&self, request: &RoomBookingRequest) -> Result<()> {
        let mut errors = match request.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        if request.check_out <= request.check_in {
            errors.push(FieldError::new(
                "check_out",
                "Check-out date must be after check-in date.",
            ));
        }
        if request.check_in < self.today {
            errors.push(FieldError::new(
                "check_in",
                "Check-in date cannot be in the past.",
            ));
        }
        if request.breakdown.largest() > MAX_ROOMS {
            errors.push(FieldError::new(
                "breakdown",
                "Each room type count must be between 0 and 10.",
            ));
        }
        if request.num_rooms > 1 {
            let total = request.breakdown.total();
            if total != u64::from(request.num_rooms) {
                errors.push(FieldError::new(
                    "num_rooms",
                    format!(
                        "Room type breakdown ({total}) must equal total rooms ({}).",
                        request.num_rooms
                    ),
                ));
            }
        }

        finish(errors)
    }

    /// Validates an event booking request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` listing every failed rule.
    pub fn validate_event(&self, request: &EventBookingRequest) -> Result<()> {
        let mut errors = match request.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors(&e),
        };

        if request.event_date < self.today {
            errors.push(FieldError::new(
                "event_date",
                "Event date cannot be in the past.",
            ));
        }

        finish(errors)
    }
}

fn finish(errors: Vec<FieldError>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::validation_failed(errors))
    }
}
