//! Room and event bookings.
//!
//! Each booking kind has its own sequence of human-readable codes
//! (`R0000000001`, `E0000000001`, ...). The next code is derived from the
//! highest stored code of that kind; [`SequenceAllocator`] does this inside
//! the same write transaction as the insert, so two writers can never be
//! handed the same code.
//!
//! Bookings are never hard-deleted. A cancelled booking keeps its code, and
//! numbers are never reissued.

pub mod allocator;
mod code;
mod event;
mod room;
pub mod validation;

#[cfg(test)]
mod proptests;

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use allocator::SequenceAllocator;
pub use code::{BookingCode, BookingKind};
pub use event::{BudgetRange, EventBooking, EventBookingRequest, EventType};
pub use room::{RoomBooking, RoomBookingRequest, RoomBreakdown, RoomType};
pub use validation::BookingValidator;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation. Every booking starts here.
    #[default]
    Pending,
    /// Confirmed by staff.
    Confirmed,
    /// Cancelled. The code stays assigned.
    Cancelled,
}

impl BookingStatus {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(Error::Validation {
                field: "status".into(),
                message: format!("'{other}' is not a valid status"),
            }),
        }
    }
}

/// A stored booking of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Booking {
    /// A room booking.
    Room(RoomBooking),
    /// An event booking.
    Event(EventBooking),
}

impl Booking {
    /// The booking kind.
    #[must_use]
    pub const fn kind(&self) -> BookingKind {
        match self {
            Self::Room(_) => BookingKind::Room,
            Self::Event(_) => BookingKind::Event,
        }
    }

    /// Database identity.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Room(b) => b.id,
            Self::Event(b) => b.id,
        }
    }

    /// The assigned booking code.
    #[must_use]
    pub const fn code(&self) -> BookingCode {
        match self {
            Self::Room(b) => b.code,
            Self::Event(b) => b.code,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        match self {
            Self::Room(b) => b.status,
            Self::Event(b) => b.status,
        }
    }

    /// Guest or organizer name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        match self {
            Self::Room(b) => &b.details.full_name,
            Self::Event(b) => &b.details.full_name,
        }
    }

    /// Contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Room(b) => &b.details.email,
            Self::Event(b) => &b.details.email,
        }
    }

    /// When the booking was recorded.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        match self {
            Self::Room(b) => b.created_at,
            Self::Event(b) => b.created_at,
        }
    }
}

/// How a caller refers to an existing booking: by identity or by code.
///
/// # Examples
///
/// ```
/// use resort::BookingRef;
///
/// assert_eq!("42".parse::<BookingRef>().unwrap(), BookingRef::Id(42));
/// assert!(matches!("R0000000001".parse::<BookingRef>().unwrap(), BookingRef::Code(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRef {
    /// Database identity.
    Id(i64),
    /// Booking code.
    Code(BookingCode),
}

impl fmt::Display for BookingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "#{id}"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

impl FromStr for BookingRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(id) = s.trim_start_matches('#').parse::<i64>() {
            return Ok(Self::Id(id));
        }
        s.parse().map(Self::Code)
    }
}
