//! Plan types for booking and content operations.
//!
//! A plan describes what an operation will change without changing it, so
//! the same plan can be printed for `--dry-run` or handed to the executor.

use crate::booking::{
    BookingCode, BookingKind, BookingStatus, EventBookingRequest, RoomBookingRequest,
};
use crate::content::{ContentKind, ContentPatch, NewContent};

/// A single action to be taken during plan execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Allocate the next room code and record the booking.
    CreateRoomBooking(RoomBookingRequest),

    /// Allocate the next event code and record the booking.
    CreateEventBooking(EventBookingRequest),

    /// Move an existing booking to a new status.
    SetBookingStatus {
        /// Booking table.
        kind: BookingKind,
        /// Booking identity.
        id: i64,
        /// Code, for reporting.
        code: BookingCode,
        /// Target status.
        status: BookingStatus,
    },

    /// Create a content item.
    CreateContent(NewContent),

    /// Apply a partial update to a live content item.
    UpdateContent {
        /// Collection.
        kind: ContentKind,
        /// Item identity.
        id: i64,
        /// Fields to change.
        patch: ContentPatch,
    },

    /// Move a content item to the recycle bin.
    SoftDeleteContent {
        /// Collection.
        kind: ContentKind,
        /// Item identity.
        id: i64,
    },

    /// Bring an item back from the recycle bin under a new identity.
    RestoreContent {
        /// Collection.
        kind: ContentKind,
        /// Identity of the item in the bin.
        id: i64,
    },

    /// Remove an item from the recycle bin for good.
    PurgeContent {
        /// Collection.
        kind: ContentKind,
        /// Identity of the item in the bin.
        id: i64,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateRoomBooking(request) => {
                format!("Create room booking for {}", request.full_name.trim())
            }
            Self::CreateEventBooking(request) => format!(
                "Create {} event booking for {}",
                request.event_type.label().to_lowercase(),
                request.full_name.trim()
            ),
            Self::SetBookingStatus { code, status, .. } => {
                format!("Mark {code} as {status}")
            }
            Self::CreateContent(new) => {
                format!("Create {} \"{}\"", new.kind(), new.fields.title())
            }
            Self::UpdateContent { kind, id, patch } => format!(
                "Update {kind} #{id} ({})",
                patch.changed_fields().join(", ")
            ),
            Self::SoftDeleteContent { kind, id } => {
                format!("Move {kind} #{id} to the recycle bin")
            }
            Self::RestoreContent { kind, id } => {
                format!("Restore {kind} #{id} from the recycle bin")
            }
            Self::PurgeContent { kind, id } => format!("Permanently delete {kind} #{id}"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new operation plan with the given description.
    ///
    /// # Examples
    ///
    /// ```
    /// use resort::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Confirm R0000000001");
    /// assert_eq!(plan.description, "Confirm R0000000001");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use resort::operations::{OperationPlan, PlanAction};
    /// use resort::ContentKind;
    ///
    /// let plan = OperationPlan::new("Purge")
    ///     .add_action(PlanAction::PurgeContent { kind: ContentKind::HeroSlide, id: 4 });
    /// assert_eq!(plan.len(), 1);
    /// ```
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}
