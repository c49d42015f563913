//! Property-based tests for booking codes and the allocator.

use std::time::SystemTime;

use proptest::prelude::*;
use rusqlite::Connection;

use super::{BookingCode, BookingKind, SequenceAllocator};
use crate::database::migrations::initialize_schema;
use crate::database::test_util::{sample_event_request, sample_room_request};

fn kind_strategy() -> impl Strategy<Value = BookingKind> {
    prop_oneof![Just(BookingKind::Room), Just(BookingKind::Event)]
}

fn number_strategy() -> impl Strategy<Value = u64> {
    1u64..=BookingCode::MAX_NUMBER
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Display and parse agree for every valid number
    #[test]
    fn code_text_round_trip(kind in kind_strategy(), number in number_strategy()) {
        let code = BookingCode::new(kind, number).unwrap();
        let text = code.to_string();
        prop_assert_eq!(text.len(), 1 + BookingCode::DIGITS);
        prop_assert_eq!(BookingCode::parse(kind, &text).unwrap(), code);
        prop_assert_eq!(text.parse::<BookingCode>().unwrap(), code);
    }

    // Fixed width makes text order agree with numeric order
    #[test]
    fn text_order_matches_numeric_order(
        kind in kind_strategy(),
        a in number_strategy(),
        b in number_strategy()
    ) {
        let left = BookingCode::new(kind, a).unwrap().to_string();
        let right = BookingCode::new(kind, b).unwrap().to_string();
        prop_assert_eq!(left.cmp(&right), a.cmp(&b));
    }

    // next() is always exactly one more, until the last number
    #[test]
    fn next_increments_by_one(kind in kind_strategy(), number in 1u64..BookingCode::MAX_NUMBER) {
        let code = BookingCode::new(kind, number).unwrap();
        prop_assert_eq!(code.next().unwrap().number(), number + 1);
    }

    // Anything that is not prefix + ten digits is refused
    #[test]
    fn junk_suffix_is_malformed(kind in kind_strategy(), suffix in "[0-9]{0,9}[a-z ]{1,3}") {
        let raw = format!("{}{suffix}", kind.prefix());
        prop_assert!(BookingCode::parse(kind, &raw).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    // Any interleaving of kinds yields gap-free, strictly increasing
    // sequences per kind
    #[test]
    fn allocation_is_monotonic_per_kind(kinds in prop::collection::vec(kind_strategy(), 1..30)) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let mut last_room = 0;
        let mut last_event = 0;
        for kind in kinds {
            let number = match kind {
                BookingKind::Room => {
                    SequenceAllocator::book_room(&conn, &sample_room_request(), SystemTime::now())
                        .unwrap()
                        .code
                        .number()
                }
                BookingKind::Event => {
                    SequenceAllocator::book_event(&conn, &sample_event_request(), SystemTime::now())
                        .unwrap()
                        .code
                        .number()
                }
            };
            let last = match kind {
                BookingKind::Room => &mut last_room,
                BookingKind::Event => &mut last_event,
            };
            prop_assert_eq!(number, *last + 1);
            *last = number;
        }
    }
}
