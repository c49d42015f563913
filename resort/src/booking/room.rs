//! Room booking requests and records.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{non_blank, validate_guests, validate_num_rooms};
use super::{BookingCode, BookingStatus};
use crate::error::{Error, Result};

/// The room categories offered by the resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Cottage.
    Cottage,
    /// Suite.
    Suite,
    /// Deluxe room.
    Deluxe,
    /// Family room.
    Family,
}

impl RoomType {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cottage => "cottage",
            Self::Suite => "suite",
            Self::Deluxe => "deluxe",
            Self::Family => "family",
        }
    }

    /// The human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cottage => "Cottage",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
            Self::Family => "Family",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cottage" => Ok(Self::Cottage),
            "suite" => Ok(Self::Suite),
            "deluxe" => Ok(Self::Deluxe),
            "family" => Ok(Self::Family),
            other => Err(Error::Validation {
                field: "room_type".into(),
                message: format!("'{other}' is not a valid choice."),
            }),
        }
    }
}

/// Per-type room counts for stays of more than one room.
///
/// # Examples
///
/// ```
/// use resort::booking::RoomBreakdown;
///
/// let breakdown = RoomBreakdown { cottage: 2, suite: 1, ..Default::default() };
/// assert_eq!(breakdown.total(), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomBreakdown {
    /// Number of cottages.
    #[serde(default)]
    pub cottage: u32,
    /// Number of suites.
    #[serde(default)]
    pub suite: u32,
    /// Number of deluxe rooms.
    #[serde(default)]
    pub deluxe: u32,
    /// Number of family rooms.
    #[serde(default)]
    pub family: u32,
}

impl RoomBreakdown {
    /// Sum of all per-type counts. Widened so that no input can overflow it.
    #[must_use]
    pub fn total(&self) -> u64 {
        [self.cottage, self.suite, self.deluxe, self.family]
            .into_iter()
            .map(u64::from)
            .sum()
    }

    /// The largest single per-type count.
    #[must_use]
    pub fn largest(&self) -> u32 {
        self.cottage.max(self.suite).max(self.deluxe).max(self.family)
    }

    /// The non-zero counts, labelled, in a fixed order.
    #[must_use]
    pub fn entries(&self) -> Vec<(RoomType, u32)> {
        [
            (RoomType::Cottage, self.cottage),
            (RoomType::Suite, self.suite),
            (RoomType::Deluxe, self.deluxe),
            (RoomType::Family, self.family),
        ]
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect()
    }
}

/// A room booking as submitted, before a code is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RoomBookingRequest {
    /// Guest name.
    #[validate(
        length(max = 200, message = "Ensure this field has no more than 200 characters."),
        custom(function = "non_blank")
    )]
    pub full_name: String,
    /// Contact phone number.
    #[validate(
        length(max = 20, message = "Ensure this field has no more than 20 characters."),
        custom(function = "non_blank")
    )]
    pub phone: String,
    /// Contact email address.
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Room category for single-room stays.
    #[serde(default)]
    pub room_type: Option<RoomType>,
    /// Number of adults.
    #[validate(custom(function = "validate_guests"))]
    pub guests: u32,
    /// Number of children.
    #[serde(default)]
    pub children: u32,
    /// Total number of rooms.
    #[validate(custom(function = "validate_num_rooms"))]
    pub num_rooms: u32,
    /// Per-type counts; must add up to `num_rooms` when more than one room is booked.
    #[serde(default)]
    pub breakdown: RoomBreakdown,
    /// Free-form requests from the guest.
    #[serde(default)]
    pub special_requests: String,
    /// Whether staff entered the booking on the guest's behalf.
    #[serde(default)]
    pub booked_by_admin: bool,
}

impl RoomBookingRequest {
    /// Creates a single-room request with default counts.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            email: email.into(),
            check_in,
            check_out,
            room_type: None,
            guests,
            children: 0,
            num_rooms: 1,
            breakdown: RoomBreakdown::default(),
            special_requests: String::new(),
            booked_by_admin: false,
        }
    }

    /// Sets the room category.
    #[must_use]
    pub fn with_room_type(mut self, room_type: RoomType) -> Self {
        self.room_type = Some(room_type);
        self
    }

    /// Sets the number of children.
    #[must_use]
    pub fn with_children(mut self, children: u32) -> Self {
        self.children = children;
        self
    }

    /// Sets the room count and the per-type breakdown.
    #[must_use]
    pub fn with_rooms(mut self, num_rooms: u32, breakdown: RoomBreakdown) -> Self {
        self.num_rooms = num_rooms;
        self.breakdown = breakdown;
        self
    }

    /// Sets the special requests text.
    #[must_use]
    pub fn with_special_requests(mut self, text: impl Into<String>) -> Self {
        self.special_requests = text.into();
        self
    }

    /// Marks the booking as entered by staff.
    #[must_use]
    pub fn booked_by_admin(mut self, by_admin: bool) -> Self {
        self.booked_by_admin = by_admin;
        self
    }

    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// A stored room booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBooking {
    /// Database identity.
    pub id: i64,
    /// The code handed to the guest.
    pub code: BookingCode,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was recorded.
    pub created_at: SystemTime,
    /// The booking details as submitted.
    pub details: RoomBookingRequest,
}
