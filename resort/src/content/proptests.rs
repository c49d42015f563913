//! Property-based tests for the content lifecycle.

use std::collections::HashSet;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use rusqlite::Connection;

use super::{ContentFields, ContentKind, ContentLifecycle, ListScope, NewContent};
use crate::database::migrations::initialize_schema;

#[derive(Debug, Clone, Copy)]
enum Fate {
    Live,
    Binned,
    Purged,
    Restored,
}

fn fate_strategy() -> impl Strategy<Value = Fate> {
    prop_oneof![
        Just(Fate::Live),
        Just(Fate::Binned),
        Just(Fate::Purged),
        Just(Fate::Restored),
    ]
}

fn item_strategy() -> impl Strategy<Value = (u32, bool, Fate)> {
    (0u32..50, any::<bool>(), fate_strategy())
}

fn at(step: usize) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000) + Duration::from_millis(step as u64)
}

fn ids(lifecycle: &ContentLifecycle<'_>, scope: ListScope) -> Vec<i64> {
    lifecycle
        .list(scope)
        .unwrap()
        .into_iter()
        .map(|item| item.id)
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // The public view and the recycle bin never share an item, and every
    // surviving item is in exactly one of the admin view and the bin
    #[test]
    fn views_partition_surviving_items(items in prop::collection::vec(item_strategy(), 0..20)) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let hero = ContentLifecycle::new(&conn, ContentKind::HeroSlide);

        let mut survivors = HashSet::new();
        for (step, (order, active, fate)) in items.iter().enumerate() {
            let new = NewContent::new(ContentFields::hero_slide("T", "S", "/h.jpg"))
                .with_order(*order)
                .with_active(*active);
            let item = hero.create(&new, at(step)).unwrap();
            match fate {
                Fate::Live => {
                    survivors.insert(item.id);
                }
                Fate::Binned => {
                    hero.soft_delete(item.id, at(step)).unwrap();
                    survivors.insert(item.id);
                }
                Fate::Purged => {
                    hero.soft_delete(item.id, at(step)).unwrap();
                    hero.purge(item.id).unwrap();
                }
                Fate::Restored => {
                    hero.soft_delete(item.id, at(step)).unwrap();
                    let restored = hero.restore(item.id, at(step)).unwrap();
                    prop_assert_ne!(restored.id, item.id);
                    survivors.insert(restored.id);
                }
            }
        }

        let active: HashSet<i64> = ids(&hero, ListScope::Active).into_iter().collect();
        let all: HashSet<i64> = ids(&hero, ListScope::All).into_iter().collect();
        let deleted: HashSet<i64> = ids(&hero, ListScope::Deleted).into_iter().collect();

        prop_assert!(active.is_disjoint(&deleted));
        prop_assert!(all.is_disjoint(&deleted));
        prop_assert!(active.is_subset(&all));

        let covered: HashSet<i64> = all.union(&deleted).copied().collect();
        prop_assert_eq!(covered, survivors);
    }

    // Live listings are sorted by (order, id)
    #[test]
    fn live_listing_is_sorted(orders in prop::collection::vec(0u32..10, 1..15)) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let gallery = ContentLifecycle::new(&conn, ContentKind::GalleryImage);

        for order in orders {
            let new = NewContent::new(ContentFields::gallery_image(None, "/g.jpg")).with_order(order);
            gallery.create(&new, at(0)).unwrap();
        }

        let listed = gallery.list(ListScope::All).unwrap();
        let keys: Vec<(u32, i64)> = listed.iter().map(|i| (i.order, i.id)).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(keys, sorted);
    }

    // A restored item always lands after every other live item
    #[test]
    fn restore_lands_last(orders in prop::collection::vec(0u32..100, 0..10)) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let explore = ContentLifecycle::new(&conn, ContentKind::ExploreCard);
        let card = || NewContent::new(ContentFields::explore_card("T", "S", "", "/e.jpg"));

        for order in &orders {
            explore.create(&card().with_order(*order), at(0)).unwrap();
        }
        let victim = explore.create(&card(), at(0)).unwrap();
        explore.soft_delete(victim.id, at(1)).unwrap();
        let restored = explore.restore(victim.id, at(2)).unwrap();

        let expected = orders.iter().copied().max().unwrap_or(0) + 1;
        prop_assert_eq!(restored.order, expected);
        let last = explore.list(ListScope::All).unwrap().pop().unwrap();
        prop_assert_eq!(last.id, restored.id);
    }
}
