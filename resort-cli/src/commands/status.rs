//! Booking status commands: `confirm` and `cancel`.

use crate::error::CliError;
use crate::utils::{load_configuration, notifier, open_database, run_plan, GlobalOptions};
use clap::Args;
use resort::notify::dispatch_confirmed;
use resort::operations::StatusPlan;
use resort::{BookingKind, BookingRef, BookingStatus};

/// Identifies one booking.
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// room or event
    #[arg(value_name = "KIND")]
    pub kind: BookingKind,

    /// Booking id or code (e.g. 12 or R0000000012)
    #[arg(value_name = "BOOKING")]
    pub booking: BookingRef,

    /// Show the plan without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl StatusCommand {
    /// Move the booking to `status`.
    ///
    /// Confirming sends the guest confirmation once the change is committed.
    pub fn execute(self, global: &GlobalOptions, status: BookingStatus) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let plan = StatusPlan::new(self.kind, self.booking, status);
        let Some(result) = run_plan(&mut db, global, self.dry_run, |conn| plan.build_plan(conn))?
        else {
            return Ok(());
        };

        // An empty plan means the booking already had this status.
        if result.actions_taken.is_empty() {
            return Ok(());
        }

        if let Some(booking) = result.booking {
            if status == BookingStatus::Confirmed {
                dispatch_confirmed(notifier(&config).as_ref(), &booking);
            }
            if !global.quiet {
                eprintln!("{} is now {}", booking.code(), booking.status());
            }
        }
        Ok(())
    }
}
