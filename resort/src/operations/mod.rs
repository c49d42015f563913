//! Booking and content operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//! 1. **Planning**: checks the request and the current state, builds a plan
//! 2. **Execution**: applies the plan through one connection
//!
//! Running both phases inside one IMMEDIATE transaction makes the plan
//! exact, including the previewed booking code.
//!
//! # Examples
//!
//! ```no_run
//! use resort::database::{Database, DatabaseConfig};
//! use resort::operations::{PlanExecutor, StatusPlan};
//! use resort::{BookingKind, BookingRef};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/resort.db")).unwrap();
//! let reference: BookingRef = "R0000000001".parse().unwrap();
//!
//! let tx = db.begin_transaction().unwrap();
//! let plan = StatusPlan::confirm(BookingKind::Room, reference).build_plan(&tx).unwrap();
//! let result = PlanExecutor::new(&tx).execute(&plan).unwrap();
//! tx.commit().unwrap();
//! ```

pub mod booking;
pub mod content;
pub mod executor;
pub mod init;
pub mod plan;
pub mod status;

#[cfg(test)]
mod proptests;

pub use booking::{BookingPlan, BookingRequest};
pub use content::ContentPlan;
pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use status::StatusPlan;
