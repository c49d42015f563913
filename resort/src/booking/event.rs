//! Event booking requests and records.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validation::{non_blank, validate_expected_guests};
use super::{BookingCode, BookingStatus};
use crate::error::{Error, Result};

/// The kinds of event the resort hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Wedding.
    Wedding,
    /// Corporate event.
    Corporate,
    /// Birthday party.
    Birthday,
    /// Anything else.
    Others,
}

impl EventType {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Corporate => "corporate",
            Self::Birthday => "birthday",
            Self::Others => "others",
        }
    }

    /// The human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wedding => "Wedding",
            Self::Corporate => "Corporate",
            Self::Birthday => "Birthday",
            Self::Others => "Others",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "wedding" => Ok(Self::Wedding),
            "corporate" => Ok(Self::Corporate),
            "birthday" => Ok(Self::Birthday),
            "others" | "other" => Ok(Self::Others),
            other => Err(Error::Validation {
                field: "event_type".into(),
                message: format!("'{other}' is not a valid choice."),
            }),
        }
    }
}

/// Budget bands offered on the event enquiry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetRange {
    /// Below 50,000.
    #[serde(rename = "below_50k")]
    Below50k,
    /// 50,000 to 1,00,000.
    #[serde(rename = "50k_100k")]
    From50kTo100k,
    /// 1,00,000 to 2,00,000.
    #[serde(rename = "100k_200k")]
    From100kTo200k,
    /// Above 2,00,000.
    #[serde(rename = "above_200k")]
    Above200k,
}

impl BudgetRange {
    /// The stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Below50k => "below_50k",
            Self::From50kTo100k => "50k_100k",
            Self::From100kTo200k => "100k_200k",
            Self::Above200k => "above_200k",
        }
    }

    /// The human-readable label, in Indian digit grouping.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Below50k => "Below ₹50,000",
            Self::From50kTo100k => "₹50,000 - ₹1,00,000",
            Self::From100kTo200k => "₹1,00,000 - ₹2,00,000",
            Self::Above200k => "Above ₹2,00,000",
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "below_50k" => Ok(Self::Below50k),
            "50k_100k" => Ok(Self::From50kTo100k),
            "100k_200k" => Ok(Self::From100kTo200k),
            "above_200k" => Ok(Self::Above200k),
            other => Err(Error::Validation {
                field: "budget_range".into(),
                message: format!("'{other}' is not a valid choice."),
            }),
        }
    }
}

/// An event booking as submitted, before a code is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventBookingRequest {
    /// Organizer name.
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
    /// Date of the event.
    pub event_date: NaiveDate,
    /// Kind of event.
    pub event_type: EventType,
    /// Expected head count.
    #[validate(custom(function = "validate_expected_guests"))]
    pub expected_guests: u32,
    /// Budget band.
    pub budget_range: BudgetRange,
    /// Free-form notes from the organizer.
    #[serde(default)]
    pub notes: String,
    /// Whether staff entered the booking on the organizer's behalf.
    #[serde(default)]
    pub booked_by_admin: bool,
}

impl EventBookingRequest {
    /// Creates a request with empty notes.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        event_date: NaiveDate,
        event_type: EventType,
        expected_guests: u32,
        budget_range: BudgetRange,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            email: email.into(),
            event_date,
            event_type,
            expected_guests,
            budget_range,
            notes: String::new(),
            booked_by_admin: false,
        }
    }

    /// Sets the notes text.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Marks the booking as entered by staff.
    #[must_use]
    pub fn booked_by_admin(mut self, by_admin: bool) -> Self {
        self.booked_by_admin = by_admin;
        self
    }
}

/// A stored event booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventBooking {
    /// Database identity.
    pub id: i64,
    /// The code handed to the organizer.
    pub code: BookingCode,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was recorded.
    pub created_at: SystemTime,
    /// The booking details as submitted.
    pub details: EventBookingRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_round_trip_through_str() {
        for budget in [
            BudgetRange::Below50k,
            BudgetRange::From50kTo100k,
            BudgetRange::From100kTo200k,
            BudgetRange::Above200k,
        ] {
            assert_eq!(budget.as_str().parse::<BudgetRange>().unwrap(), budget);
        }
        assert!("1m_plus".parse::<BudgetRange>().is_err());
    }

    #[test]
    fn test_budget_serde_names() {
        let json = serde_json::to_string(&BudgetRange::From50kTo100k).unwrap();
        assert_eq!(json, "\"50k_100k\"");
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!("Wedding".parse::<EventType>().unwrap(), EventType::Wedding);
        assert_eq!("other".parse::<EventType>().unwrap(), EventType::Others);
        assert!("concert".parse::<EventType>().is_err());
        assert_eq!(EventType::Corporate.label(), "Corporate");
    }
}
