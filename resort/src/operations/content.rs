//! Content operation planning.
//!
//! Each planner checks the lifecycle preconditions up front so that a
//! dry run reports the same failures a real run would.

use rusqlite::Connection;

use crate::content::{ContentItem, ContentKind, ContentLifecycle, ContentPatch, NewContent};
use crate::database::Database;
use crate::error::{Error, Result};

use super::plan::{OperationPlan, PlanAction};

#[derive(Debug, Clone, PartialEq, Eq)]
enum ContentOperation {
    Create(NewContent),
    Update { id: i64, patch: ContentPatch },
    SoftDelete { id: i64 },
    Restore { id: i64 },
    Purge { id: i64 },
}

/// Plans a change to one content collection.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use resort::database::migrations::initialize_schema;
/// use resort::operations::ContentPlan;
/// use resort::ContentKind;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
///
/// let err = ContentPlan::restore(ContentKind::HeroSlide, 1).build_plan(&conn).unwrap_err();
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPlan {
    kind: ContentKind,
    operation: ContentOperation,
}

impl ContentPlan {
    /// Plans the creation of an item. The collection follows the fields.
    #[must_use]
    pub fn create(new: NewContent) -> Self {
        Self {
            kind: new.kind(),
            operation: ContentOperation::Create(new),
        }
    }

    /// Plans a partial update of a live item.
    #[must_use]
    pub const fn update(kind: ContentKind, id: i64, patch: ContentPatch) -> Self {
        Self {
            kind,
            operation: ContentOperation::Update { id, patch },
        }
    }

    /// Plans moving an item to the recycle bin.
    #[must_use]
    pub const fn soft_delete(kind: ContentKind, id: i64) -> Self {
        Self {
            kind,
            operation: ContentOperation::SoftDelete { id },
        }
    }

    /// Plans restoring an item from the recycle bin.
    #[must_use]
    pub const fn restore(kind: ContentKind, id: i64) -> Self {
        Self {
            kind,
            operation: ContentOperation::Restore { id },
        }
    }

    /// Plans permanently deleting an item from the recycle bin.
    #[must_use]
    pub const fn purge(kind: ContentKind, id: i64) -> Self {
        Self {
            kind,
            operation: ContentOperation::Purge { id },
        }
    }

    /// The collection this plan touches.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for fields or patches that break a rule
    /// - `NotFound` for a missing item, an update of an item in the recycle
    ///   bin, or a restore or purge of an item that is not in the bin
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let kind = self.kind;
        match &self.operation {
            ContentOperation::Create(new) => {
                new.fields.validate()?;
                let mut plan = OperationPlan::new(format!("Add {kind}"))
                    .add_action(PlanAction::CreateContent(new.clone()));
                if !new.is_active {
                    plan = plan.add_warning(format!("The new {kind} will be hidden"));
                }
                Ok(plan)
            }
            ContentOperation::Update { id, patch } => {
                let mut item = self.existing(conn, *id)?;
                if item.in_recycle_bin() {
                    return Err(self.not_found(*id));
                }
                let plan = OperationPlan::new(format!("Update {kind} #{id}"));
                if patch.is_empty() {
                    return Ok(plan.add_warning("Nothing to change"));
                }
                item.apply(patch)?;
                Ok(plan.add_action(PlanAction::UpdateContent {
                    kind,
                    id: *id,
                    patch: patch.clone(),
                }))
            }
            ContentOperation::SoftDelete { id } => {
                let item = self.existing(conn, *id)?;
                let plan = OperationPlan::new(format!("Delete {kind} #{id}"));
                if item.in_recycle_bin() {
                    return Ok(plan.add_warning(format!("{kind} #{id} is already in the recycle bin")));
                }
                Ok(plan.add_action(PlanAction::SoftDeleteContent { kind, id: *id }))
            }
            ContentOperation::Restore { id } => {
                self.in_bin(conn, *id)?;
                let position = Database::max_live_order(conn, kind)?.saturating_add(1);
                Ok(
                    OperationPlan::new(format!("Restore {kind} #{id} at position {position}"))
                        .add_action(PlanAction::RestoreContent { kind, id: *id })
                        .add_warning("The restored item gets a new id"),
                )
            }
            ContentOperation::Purge { id } => {
                self.in_bin(conn, *id)?;
                Ok(OperationPlan::new(format!("Purge {kind} #{id}"))
                    .add_action(PlanAction::PurgeContent { kind, id: *id }))
            }
        }
    }

    fn existing(&self, conn: &Connection, id: i64) -> Result<ContentItem> {
        ContentLifecycle::new(conn, self.kind)
            .get(id)?
            .ok_or_else(|| self.not_found(id))
    }

    fn in_bin(&self, conn: &Connection, id: i64) -> Result<ContentItem> {
        let item = self.existing(conn, id)?;
        if item.in_recycle_bin() {
            Ok(item)
        } else {
            Err(self.not_found(id))
        }
    }

    fn not_found(&self, id: i64) -> Error {
        Error::not_found(format!("{} #{id}", self.kind))
    }
}
