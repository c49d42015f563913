//! `bookings` command: list bookings of one kind.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, output_format, parse_output_format,
    GlobalOptions, Records,
};
use clap::Args;
use resort::config::OutputFormat;
use resort::{Booking, BookingKind, BookingStatus, Database};

/// List bookings, newest first.
#[derive(Args, Debug)]
pub struct BookingsCommand {
    /// room or event
    #[arg(value_name = "KIND")]
    pub kind: BookingKind,

    /// Only bookings with this status (pending, confirmed, cancelled)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<BookingStatus>,

    /// Output format: table, json, csv or tsv
    #[arg(long, value_name = "FORMAT", value_parser = parse_output_format)]
    pub format: Option<OutputFormat>,
}

impl BookingsCommand {
    /// Execute the bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let bookings = Database::list_bookings(db.connection(), self.kind, self.status)?;
        let records = records(self.kind, &bookings);

        let format = output_format(self.format, &config);
        records.write(format, &mut std::io::stdout().lock())?;

        if !global.quiet && format == OutputFormat::Table {
            eprintln!("{} {} booking(s)", bookings.len(), self.kind);
        }
        Ok(())
    }
}

fn records(kind: BookingKind, bookings: &[Booking]) -> Records {
    let mut headers = vec!["id", "code", "status", "name", "email", "phone"];
    match kind {
        BookingKind::Room => headers.extend(["check_in", "check_out", "rooms", "guests"]),
        BookingKind::Event => headers.extend(["event_date", "event_type", "guests", "budget"]),
    }
    headers.push("created_at");

    let rows = bookings
        .iter()
        .map(|booking| {
            let mut row = vec![
                booking.id().to_string(),
                booking.code().to_string(),
                booking.status().to_string(),
                booking.full_name().to_string(),
                booking.email().to_string(),
            ];
            match booking {
                Booking::Room(room) => {
                    let d = &room.details;
                    row.extend([
                        d.phone.clone(),
                        d.check_in.to_string(),
                        d.check_out.to_string(),
                        d.num_rooms.to_string(),
                        (d.guests + d.children).to_string(),
                    ]);
                }
                Booking::Event(event) => {
                    let d = &event.details;
                    row.extend([
                        d.phone.clone(),
                        d.event_date.to_string(),
                        d.event_type.to_string(),
                        d.expected_guests.to_string(),
                        d.budget_range.to_string(),
                    ]);
                }
            }
            row.push(format_timestamp(booking.created_at()));
            row
        })
        .collect();

    Records { headers, rows }
}
