//! Booking kinds and their human-readable sequential codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The independent booking namespaces, each with its own code sequence.
///
/// # Examples
///
/// ```
/// use resort::BookingKind;
///
/// assert_eq!(BookingKind::Room.prefix(), 'R');
/// assert_eq!(BookingKind::Event.prefix(), 'E');
/// assert_eq!("events".parse::<BookingKind>().unwrap(), BookingKind::Event);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    /// Room stays, coded `R0000000001`, `R0000000002`, ...
    Room,
    /// Event reservations, coded `E0000000001`, ...
    Event,
}

impl BookingKind {
    /// All booking kinds.
    pub const ALL: [Self; 2] = [Self::Room, Self::Event];

    /// The single-character prefix of this kind's codes.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Room => 'R',
            Self::Event => 'E',
        }
    }

    /// Looks up the kind that uses the given prefix.
    #[must_use]
    pub const fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'R' => Some(Self::Room),
            'E' => Some(Self::Event),
            _ => None,
        }
    }

    /// The table holding bookings of this kind.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Room => "room_bookings",
            Self::Event => "event_bookings",
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => write!(f, "room"),
            Self::Event => write!(f, "event"),
        }
    }
}

impl FromStr for BookingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "room" | "rooms" => Ok(Self::Room),
            "event" | "events" => Ok(Self::Event),
            other => Err(Error::Validation {
                field: "kind".into(),
                message: format!("unknown booking kind '{other}' (expected room or event)"),
            }),
        }
    }
}

/// A booking code: the kind prefix followed by ten zero-padded digits.
///
/// Codes of the same kind sort lexicographically in numeric order, since the
/// width is fixed.
///
/// # Examples
///
/// ```
/// use resort::{BookingCode, BookingKind};
///
/// let first = BookingCode::first(BookingKind::Room);
/// assert_eq!(first.to_string(), "R0000000001");
///
/// let next = first.next().unwrap();
/// assert_eq!(next.to_string(), "R0000000002");
///
/// let parsed: BookingCode = "E0000000007".parse().unwrap();
/// assert_eq!(parsed.kind(), BookingKind::Event);
/// assert_eq!(parsed.number(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingCode {
    kind: BookingKind,
    number: u64,
}

impl BookingCode {
    /// Number of digits after the prefix.
    pub const DIGITS: usize = 10;

    /// The largest number that fits in [`Self::DIGITS`] digits.
    pub const MAX_NUMBER: u64 = 9_999_999_999;

    /// Creates a code from its parts.
    ///
    /// # Errors
    ///
    /// Returns `SequenceExhausted` if `number` does not fit in ten digits, or
    /// a validation error if it is zero.
    pub fn new(kind: BookingKind, number: u64) -> Result<Self> {
        if number == 0 {
            return Err(Error::Validation {
                field: "booking_code".into(),
                message: "booking numbers start at 1".into(),
            });
        }
        if number > Self::MAX_NUMBER {
            return Err(Error::SequenceExhausted { kind });
        }
        Ok(Self { kind, number })
    }

    /// The first code of a sequence, used when no booking of that kind exists.
    #[must_use]
    pub const fn first(kind: BookingKind) -> Self {
        Self { kind, number: 1 }
    }

    /// Returns the code following this one.
    ///
    /// # Errors
    ///
    /// Returns `SequenceExhausted` when this is the last ten-digit number.
    pub fn next(self) -> Result<Self> {
        if self.number >= Self::MAX_NUMBER {
            return Err(Error::SequenceExhausted { kind: self.kind });
        }
        Ok(Self {
            kind: self.kind,
            number: self.number + 1,
        })
    }

    /// Parses a stored code, requiring it to belong to `kind`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedSequenceState` if the prefix, the length, or the
    /// digits are wrong. A stored code that cannot be read must never be
    /// replaced with a guess.
    pub fn parse(kind: BookingKind, raw: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedSequenceState {
            kind,
            code: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut chars = raw.chars();
        if chars.next() != Some(kind.prefix()) {
            return Err(malformed(&format!("expected prefix '{}'", kind.prefix())));
        }
        let digits = chars.as_str();
        if digits.len() != Self::DIGITS {
            return Err(malformed(&format!(
                "expected {} digits, found {}",
                Self::DIGITS,
                digits.chars().count()
            )));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("suffix is not numeric"));
        }
        let number: u64 = digits
            .parse()
            .map_err(|e: std::num::ParseIntError| malformed(&e.to_string()))?;
        if number == 0 {
            return Err(malformed("number must be at least 1"));
        }
        Ok(Self { kind, number })
    }

    /// The booking kind this code belongs to.
    #[must_use]
    pub const fn kind(&self) -> BookingKind {
        self.kind
    }

    /// The numeric part of the code.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for BookingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:010}", self.kind.prefix(), self.number)
    }
}

impl FromStr for BookingCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let kind = s
            .chars()
            .next()
            .and_then(BookingKind::from_prefix)
            .ok_or_else(|| Error::Validation {
                field: "booking_code".into(),
                message: format!("'{s}' does not start with a booking prefix (R or E)"),
            })?;
        Self::parse(kind, s)
    }
}

impl Serialize for BookingCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookingCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
