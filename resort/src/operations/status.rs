//! Booking status changes.

use rusqlite::Connection;

use crate::booking::{BookingKind, BookingRef, BookingStatus};
use crate::database::Database;
use crate::error::{Error, Result};

use super::plan::{OperationPlan, PlanAction};

/// Plans a confirm or cancel of an existing booking.
///
/// Setting a booking to the status it already has produces an empty plan
/// with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPlan {
    kind: BookingKind,
    reference: BookingRef,
    status: BookingStatus,
}

impl StatusPlan {
    /// Plans moving the referenced booking to `status`.
    #[must_use]
    pub const fn new(kind: BookingKind, reference: BookingRef, status: BookingStatus) -> Self {
        Self {
            kind,
            reference,
            status,
        }
    }

    /// Plans a confirmation.
    #[must_use]
    pub const fn confirm(kind: BookingKind, reference: BookingRef) -> Self {
        Self::new(kind, reference, BookingStatus::Confirmed)
    }

    /// Plans a cancellation.
    #[must_use]
    pub const fn cancel(kind: BookingKind, reference: BookingRef) -> Self {
        Self::new(kind, reference, BookingStatus::Cancelled)
    }

    /// The status being planned.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the reference matches no booking of this kind.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let booking = Database::resolve_booking(conn, self.kind, self.reference)?
            .ok_or_else(|| Error::not_found(format!("{} booking {}", self.kind, self.reference)))?;
        let code = booking.code();
        let current = booking.status();

        let plan = OperationPlan::new(format!("Mark {code} as {}", self.status));
        if current == self.status {
            return Ok(plan.add_warning(format!("{code} is already {current}")));
        }

        let mut plan = plan.add_action(PlanAction::SetBookingStatus {
            kind: self.kind,
            id: booking.id(),
            code,
            status: self.status,
        });
        if current == BookingStatus::Cancelled {
            plan = plan.add_warning(format!("{code} was cancelled"));
        }
        Ok(plan)
    }
}
