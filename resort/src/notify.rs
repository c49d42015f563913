//! Booking notifications.
//!
//! Notifications are handed the booking after it has been committed.
//! Delivery is best effort: a failing [`Notifier`] is logged and reported,
//! and never undoes the booking.

use std::fmt::Write as _;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::booking::{Booking, EventBooking, RoomBooking};
use crate::error::Result;

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Receives booking events once they are stored.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// A new booking was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn booking_created(&self, booking: &Booking) -> Result<()>;

    /// A booking was confirmed by staff.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be delivered.
    fn booking_confirmed(&self, booking: &Booking) -> Result<()>;
}

/// Writes notifications to the log at info level.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    resort_name: String,
    admin_email: Option<String>,
}

impl LogNotifier {
    /// Creates a notifier signing messages as `resort_name`.
    #[must_use]
    pub fn new(resort_name: impl Into<String>, admin_email: Option<String>) -> Self {
        Self {
            resort_name: resort_name.into(),
            admin_email,
        }
    }
}

impl Notifier for LogNotifier {
    fn booking_created(&self, booking: &Booking) -> Result<()> {
        let message = created_message(booking, &self.resort_name);
        let to = self.admin_email.as_deref().unwrap_or("staff");
        log::info!("to {to}: {}\n{}", message.subject, message.body);
        Ok(())
    }

    fn booking_confirmed(&self, booking: &Booking) -> Result<()> {
        let message = confirmed_message(booking, &self.resort_name);
        log::info!("to {}: {}\n{}", booking.email(), message.subject, message.body);
        Ok(())
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn booking_created(&self, _booking: &Booking) -> Result<()> {
        Ok(())
    }

    fn booking_confirmed(&self, _booking: &Booking) -> Result<()> {
        Ok(())
    }
}

/// Sends the booking-created notification. Returns whether it went out.
pub fn dispatch_created(notifier: &dyn Notifier, booking: &Booking) -> bool {
    match notifier.booking_created(booking) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("notification for {} failed: {e}", booking.code());
            false
        }
    }
}

/// Sends the booking-confirmed notification. Returns whether it went out.
pub fn dispatch_confirmed(notifier: &dyn Notifier, booking: &Booking) -> bool {
    match notifier.booking_confirmed(booking) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("confirmation for {} failed: {e}", booking.code());
            false
        }
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format("%Y-%m-%d %H:%M UTC").to_string()
}

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() {
        "None"
    } else {
        text
    }
}

fn room_lines(booking: &RoomBooking) -> String {
    let details = &booking.details;
    if details.num_rooms <= 1 {
        let label = details.room_type.map_or("Not specified", |t| t.label());
        return format!("   Type: {label}");
    }
    let entries = details.breakdown.entries();
    if entries.is_empty() {
        return "   Type: Not specified".to_string();
    }
    entries
        .iter()
        .map(|(room_type, count)| format!("   {}: {count}", room_type.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn room_created_body(booking: &RoomBooking) -> String {
    let d = &booking.details;
    let mut body = String::new();
    let _ = writeln!(body, "Booking ID: {}", booking.code);
    let _ = writeln!(body, "Guest: {}", d.full_name);
    let _ = writeln!(body, "Email: {}", d.email);
    let _ = writeln!(body, "Phone: {}", d.phone);
    let _ = writeln!(body);
    let _ = writeln!(body, "Guests:");
    let _ = writeln!(body, "   Adults: {}", d.guests);
    let _ = writeln!(body, "   Children: {}", d.children);
    let _ = writeln!(body, "   Total: {}", d.guests + d.children);
    let _ = writeln!(body);
    let _ = writeln!(body, "Room Details:");
    let _ = writeln!(body, "   Total Rooms: {}", d.num_rooms);
    let _ = writeln!(body, "{}", room_lines(booking));
    let _ = writeln!(body, "   Check-in: {}", d.check_in);
    let _ = writeln!(body, "   Check-out: {}", d.check_out);
    let _ = writeln!(body);
    let _ = writeln!(body, "Special Requests:");
    let _ = writeln!(body, "{}", or_none(&d.special_requests));
    let _ = writeln!(body);
    let _ = writeln!(body, "Booked at: {}", timestamp(booking.created_at));
    let _ = write!(body, "Status: {}", booking.status.as_str().to_uppercase());
    body
}

fn event_created_body(booking: &EventBooking) -> String {
    let d = &booking.details;
    let mut body = String::new();
    let _ = writeln!(body, "Booking ID: {}", booking.code);
    let _ = writeln!(body, "Organizer: {}", d.full_name);
    let _ = writeln!(body, "Email: {}", d.email);
    let _ = writeln!(body, "Phone: {}", d.phone);
    let _ = writeln!(body);
    let _ = writeln!(body, "Event Details:");
    let _ = writeln!(body, "   Type: {}", d.event_type.label());
    let _ = writeln!(body, "   Date: {}", d.event_date);
    let _ = writeln!(body, "   Expected Guests: {}", d.expected_guests);
    let _ = writeln!(body, "   Budget: {}", d.budget_range.label());
    let _ = writeln!(body);
    let _ = writeln!(body, "Additional Notes:");
    let _ = writeln!(body, "{}", or_none(&d.notes));
    let _ = writeln!(body);
    let _ = writeln!(body, "Booked at: {}", timestamp(booking.created_at));
    let _ = write!(body, "Status: {}", booking.status.as_str().to_uppercase());
    body
}

/// Renders the staff-facing message for a new booking.
#[must_use]
pub fn created_message(booking: &Booking, resort_name: &str) -> Message {
    match booking {
        Booking::Room(room) => Message {
            subject: format!(
                "New Room Booking {} - {} ({resort_name})",
                room.code, room.details.full_name
            ),
            body: room_created_body(room),
        },
        Booking::Event(event) => Message {
            subject: format!(
                "New Event Booking {} - {} ({resort_name})",
                event.code, event.details.full_name
            ),
            body: event_created_body(event),
        },
    }
}

/// Renders the guest-facing confirmation for a booking.
#[must_use]
pub fn confirmed_message(booking: &Booking, resort_name: &str) -> Message {
    let mut body = format!("Dear {},\n\n", booking.full_name());
    match booking {
        Booking::Room(room) => {
            let d = &room.details;
            let _ = writeln!(
                body,
                "We are delighted to confirm your room reservation at {resort_name}.\n"
            );
            let _ = writeln!(body, "   Booking ID: {}", room.code);
            let _ = writeln!(body, "   Check-in Date: {}", d.check_in);
            let _ = writeln!(body, "   Check-out Date: {}", d.check_out);
            let _ = writeln!(body, "   Number of Rooms: {}", d.num_rooms);
            let _ = writeln!(
                body,
                "   Number of Guests: {} Adults, {} Children",
                d.guests, d.children
            );
            let _ = writeln!(body, "\nPlease bring a valid ID proof at the time of check-in.");
        }
        Booking::Event(event) => {
            let d = &event.details;
            let _ = writeln!(
                body,
                "We are thrilled to confirm your event booking at {resort_name}.\n"
            );
            let _ = writeln!(body, "   Booking ID: {}", event.code);
            let _ = writeln!(body, "   Event Type: {}", d.event_type.label());
            let _ = writeln!(body, "   Event Date: {}", d.event_date);
            let _ = writeln!(body, "   Expected Guests: {}", d.expected_guests);
        }
    }
    let _ = write!(body, "\nWarm regards,\nTeam {resort_name}");

    let what = match booking {
        Booking::Room(_) => "Booking",
        Booking::Event(_) => "Event Booking",
    };
    Message {
        subject: format!("{what} Confirmed - {} - {resort_name}", booking.code()),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{
        BookingCode, BookingKind, BookingStatus, RoomBreakdown, RoomType,
    };
    use crate::database::test_util::{sample_event_request, sample_room_request};
    use crate::Error;

    fn room(request: crate::booking::RoomBookingRequest) -> Booking {
        Booking::Room(RoomBooking {
            id: 1,
            code: BookingCode::first(BookingKind::Room),
            status: BookingStatus::Pending,
            created_at: SystemTime::UNIX_EPOCH,
            details: request,
        })
    }

    fn event() -> Booking {
        Booking::Event(EventBooking {
            id: 2,
            code: BookingCode::first(BookingKind::Event),
            status: BookingStatus::Pending,
            created_at: SystemTime::UNIX_EPOCH,
            details: sample_event_request(),
        })
    }

    #[test]
    fn test_single_room_message() {
        let booking = room(sample_room_request().with_room_type(RoomType::Suite));
        let message = created_message(&booking, "Silvermoon Park");
        assert!(message.subject.starts_with("New Room Booking R0000000001 - Asha Rao"));
        assert!(message.body.contains("   Type: Suite"));
        assert!(message.body.contains("Special Requests:\nNone"));
        assert!(message.body.contains("Booked at: 1970-01-01 00:00 UTC"));
        assert!(message.body.ends_with("Status: PENDING"));
    }

    #[test]
    fn test_multi_room_breakdown() {
        let request = sample_room_request().with_rooms(
            3,
            RoomBreakdown {
                cottage: 2,
                deluxe: 1,
                ..Default::default()
            },
        );
        let message = created_message(&room(request), "Silvermoon Park");
        assert!(message.body.contains("   Total Rooms: 3\n   Cottage: 2\n   Deluxe: 1\n"));
        assert!(!message.body.contains("Suite"));
    }

    #[test]
    fn test_event_messages() {
        let booking = event();
        let created = created_message(&booking, "Silvermoon Park");
        assert!(created.body.contains("Organizer: Vikram Menon"));
        assert!(created.body.contains("Expected Guests: 150"));

        let confirmed = confirmed_message(&booking, "Silvermoon Park");
        assert_eq!(
            confirmed.subject,
            "Event Booking Confirmed - E0000000001 - Silvermoon Park"
        );
        assert!(confirmed.body.starts_with("Dear Vikram Menon,"));
        assert!(confirmed.body.ends_with("Team Silvermoon Park"));
    }

    #[test]
    fn test_dispatch_reports_failure_without_panicking() {
        let booking = event();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_booking_created()
            .times(1)
            .returning(|_| Err(Error::Validation {
                field: "smtp".into(),
                message: "unreachable".into(),
            }));
        notifier
            .expect_booking_confirmed()
            .times(1)
            .returning(|_| Ok(()));

        assert!(!dispatch_created(&notifier, &booking));
        assert!(dispatch_confirmed(&notifier, &booking));
    }

    #[test]
    fn test_builtin_notifiers_succeed() {
        let booking = event();
        assert!(dispatch_created(&NullNotifier, &booking));
        let log = LogNotifier::new("Silvermoon Park", Some("desk@example.com".into()));
        assert!(dispatch_created(&log, &booking));
        assert!(dispatch_confirmed(&log, &booking));
    }
}
