//! Booking creation commands.
//!
//! `book-room` and `book-event` validate the request, allocate the next
//! booking code inside one transaction, and print the code on stdout.

use crate::error::CliError;
use crate::utils::{load_configuration, notifier, open_database, run_plan, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use resort::booking::{
    BudgetRange, EventBookingRequest, EventType, RoomBookingRequest, RoomBreakdown, RoomType,
};
use resort::notify::dispatch_created;
use resort::operations::{BookingPlan, BookingRequest};

/// Guest contact details shared by both booking kinds.
#[derive(Args, Debug)]
pub struct ContactArgs {
    /// Guest or organizer name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Contact phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: String,

    /// Contact email address
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Record the booking as made by staff
    #[arg(long)]
    pub by_admin: bool,

    /// Show the plan without booking
    #[arg(long)]
    pub dry_run: bool,
}

/// Book one or more rooms.
#[derive(Args, Debug)]
pub struct BookRoomCommand {
    #[command(flatten)]
    pub contact: ContactArgs,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Number of adults
    #[arg(long, default_value_t = 1)]
    pub guests: u32,

    /// Number of children
    #[arg(long, default_value_t = 0)]
    pub children: u32,

    /// Room category for a single-room stay
    #[arg(long, value_name = "TYPE")]
    pub room_type: Option<RoomType>,

    /// Total rooms; defaults to the sum of the per-type counts
    #[arg(long, value_name = "N")]
    pub rooms: Option<u32>,

    /// Cottages in a multi-room stay
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub cottage: u32,

    /// Suites in a multi-room stay
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub suite: u32,

    /// Deluxe rooms in a multi-room stay
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub deluxe: u32,

    /// Family rooms in a multi-room stay
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub family: u32,

    /// Free-text requests from the guest
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub special_requests: String,
}

impl BookRoomCommand {
    fn request(&self) -> RoomBookingRequest {
        let breakdown = RoomBreakdown {
            cottage: self.cottage,
            suite: self.suite,
            deluxe: self.deluxe,
            family: self.family,
        };
        let rooms = self.rooms.unwrap_or_else(|| {
            u32::try_from(breakdown.total()).unwrap_or(u32::MAX).max(1)
        });

        let contact = &self.contact;
        let mut request = RoomBookingRequest::new(
            contact.name.as_str(),
            contact.phone.as_str(),
            contact.email.as_str(),
            self.check_in,
            self.check_out,
            self.guests,
        )
        .with_children(self.children)
        .with_special_requests(self.special_requests.as_str())
        .booked_by_admin(contact.by_admin);

        if let Some(room_type) = self.room_type {
            request = request.with_room_type(room_type);
        }
        if rooms > 1 {
            request = request.with_rooms(rooms, breakdown);
        }
        request
    }

    /// Execute the book-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let request = BookingRequest::Room(self.request());
        book(global, request, self.contact.dry_run)
    }
}

/// Book an event.
#[derive(Args, Debug)]
pub struct BookEventCommand {
    #[command(flatten)]
    pub contact: ContactArgs,

    /// Event date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: NaiveDate,

    /// wedding, corporate, birthday or others
    #[arg(long, value_name = "TYPE")]
    pub event_type: EventType,

    /// Expected number of guests
    #[arg(long, value_name = "N")]
    pub guests: u32,

    /// below_50k, 50k_100k, 100k_200k or above_200k
    #[arg(long, value_name = "RANGE")]
    pub budget: BudgetRange,

    /// Additional notes from the organizer
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub notes: String,
}

impl BookEventCommand {
    /// Execute the book-event command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let contact = &self.contact;
        let request = EventBookingRequest::new(
            contact.name.as_str(),
            contact.phone.as_str(),
            contact.email.as_str(),
            self.date,
            self.event_type,
            self.guests,
            self.budget,
        )
        .with_notes(self.notes.as_str())
        .booked_by_admin(contact.by_admin);

        book(global, BookingRequest::Event(request), contact.dry_run)
    }
}

fn book(global: &GlobalOptions, request: BookingRequest, dry_run: bool) -> Result<(), CliError> {
    let config = load_configuration(global)?;
    let mut db = open_database(global, &config)?;

    let plan = BookingPlan::new(request);
    let Some(result) = run_plan(&mut db, global, dry_run, |conn| plan.build_plan(conn))? else {
        return Ok(());
    };

    let Some(booking) = result.booking else {
        return Err(CliError::SemanticFailure(
            "booking was not recorded".to_string(),
        ));
    };

    dispatch_created(notifier(&config).as_ref(), &booking);

    println!("{}", booking.code());
    if !global.quiet {
        eprintln!(
            "Booked {} for {} ({})",
            booking.code(),
            booking.full_name(),
            booking.status()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        room: BookRoomCommand,
    }

    fn parse(args: &[&str]) -> RoomBookingRequest {
        let mut argv = vec![
            "resort",
            "--name",
            "Asha Rao",
            "--phone",
            "+91 90000 00000",
            "--email",
            "asha@example.com",
            "--check-in",
            "2099-03-10",
            "--check-out",
            "2099-03-12",
        ];
        argv.extend_from_slice(args);
        Harness::try_parse_from(argv).unwrap().room.request()
    }

    #[test]
    fn test_single_room_request() {
        let request = parse(&["--room-type", "suite", "--guests", "2"]);
        assert_eq!(request.num_rooms, 1);
        assert_eq!(request.room_type, Some(RoomType::Suite));
        assert_eq!(request.guests, 2);
        assert_eq!(request.breakdown.total(), 0);
    }

    #[test]
    fn test_rooms_default_to_breakdown_total() {
        let request = parse(&["--cottage", "2", "--deluxe", "1"]);
        assert_eq!(request.num_rooms, 3);
        assert_eq!(request.breakdown.cottage, 2);
    }

    #[test]
    fn test_explicit_rooms_kept_for_validation() {
        let request = parse(&["--rooms", "4", "--cottage", "2"]);
        assert_eq!(request.num_rooms, 4);
        assert_eq!(request.breakdown.total(), 2);
    }

    #[test]
    fn test_huge_breakdown_stays_multi_room() {
        let request = parse(&["--cottage", "4294967295", "--suite", "1"]);
        assert_eq!(request.num_rooms, u32::MAX);
        assert_eq!(request.breakdown.total(), 4_294_967_296);
    }
}
