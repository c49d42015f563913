//! Plan execution engine.
//!
//! The executor applies a plan through a single connection. Callers run it
//! inside [`Database::begin_transaction`](crate::database::Database::begin_transaction)
//! so that code allocation and every multi-step content change commit or
//! roll back as one unit.

use std::time::SystemTime;

use rusqlite::Connection;

use crate::booking::{Booking, SequenceAllocator};
use crate::content::{ContentItem, ContentLifecycle};
use crate::database::Database;
use crate::error::{Error, Result};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// The booking created or changed, if any.
    pub booking: Option<Booking>,

    /// The content item created, changed, restored or purged, if any.
    pub content: Option<ContentItem>,
}

impl ExecutionResult {
    fn new(plan: &OperationPlan, dry_run: bool) -> Self {
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            booking: None,
            content: None,
        }
    }
}

/// Executes operation plans against a connection.
///
/// # Examples
///
/// ```no_run
/// use resort::database::{Database, DatabaseConfig};
/// use resort::operations::{ContentPlan, PlanExecutor};
/// use resort::ContentKind;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/resort.db")).unwrap();
/// let tx = db.begin_transaction().unwrap();
/// let plan = ContentPlan::soft_delete(ContentKind::GalleryImage, 3)
///     .build_plan(&tx)
///     .unwrap();
/// let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
/// tx.commit().unwrap();
/// assert!(result.success);
/// ```
pub struct PlanExecutor<'a> {
    conn: &'a Connection,
    dry_run: bool,
    now: SystemTime,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor stamping changes with the current time.
    #[must_use]
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            dry_run: false,
            now: SystemTime::now(),
        }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the plan is reported but nothing is written.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Uses `now` for creation and deletion timestamps.
    #[must_use]
    pub const fn at(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an action. Actions already applied
    /// are undone only if the caller's transaction is rolled back.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        let mut result = ExecutionResult::new(plan, self.dry_run);
        if self.dry_run {
            log::debug!("dry run: {}", plan.description);
            return Ok(result);
        }

        for action in &plan.actions {
            self.execute_action(action, &mut result)?;
        }

        Ok(result)
    }

    fn execute_action(&self, action: &PlanAction, result: &mut ExecutionResult) -> Result<()> {
        match action {
            PlanAction::CreateRoomBooking(request) => {
                let booking = SequenceAllocator::book_room(self.conn, request, self.now)?;
                result.booking = Some(Booking::Room(booking));
            }
            PlanAction::CreateEventBooking(request) => {
                let booking = SequenceAllocator::book_event(self.conn, request, self.now)?;
                result.booking = Some(Booking::Event(booking));
            }
            PlanAction::SetBookingStatus {
                kind,
                id,
                code,
                status,
            } => {
                if !Database::set_booking_status(self.conn, *kind, *id, *status)? {
                    return Err(Error::not_found(format!("{kind} booking {code}")));
                }
                log::info!("{code} is now {status}");
                result.booking = Database::get_booking(self.conn, *kind, *id)?;
            }
            PlanAction::CreateContent(new) => {
                let item = ContentLifecycle::new(self.conn, new.kind()).create(new, self.now)?;
                result.content = Some(item);
            }
            PlanAction::UpdateContent { kind, id, patch } => {
                let item = ContentLifecycle::new(self.conn, *kind).update(*id, patch)?;
                result.content = Some(item);
            }
            PlanAction::SoftDeleteContent { kind, id } => {
                let outcome = ContentLifecycle::new(self.conn, *kind).soft_delete(*id, self.now)?;
                result.content = Some(outcome.item().clone());
            }
            PlanAction::RestoreContent { kind, id } => {
                let item = ContentLifecycle::new(self.conn, *kind).restore(*id, self.now)?;
                result.content = Some(item);
            }
            PlanAction::PurgeContent { kind, id } => {
                let item = ContentLifecycle::new(self.conn, *kind).purge(*id)?;
                result.content = Some(item);
            }
        }
        Ok(())
    }
}
