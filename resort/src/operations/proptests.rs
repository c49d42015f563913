//! Property-based tests for the plan-execute pattern.

use super::{ContentPlan, PlanExecutor};
use crate::content::{ContentFields, ContentKind, ContentLifecycle, ListScope, NewContent};
use crate::database::migrations::initialize_schema;
use proptest::prelude::*;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
enum Step {
    Create,
    Delete(usize),
    Restore(usize),
    Purge(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => Just(Step::Create),
        2 => (0usize..8).prop_map(Step::Delete),
        1 => (0usize..8).prop_map(Step::Restore),
        1 => (0usize..8).prop_map(Step::Purge),
    ]
}

fn image(n: usize) -> NewContent {
    NewContent::new(ContentFields::gallery_image(
        Some(format!("View {n}")),
        format!("/uploads/gallery/{n}.jpg"),
    ))
}

fn plan_for(conn: &Connection, step: Step, n: usize) -> ContentPlan {
    let kind = ContentKind::GalleryImage;
    let ids: Vec<i64> = ContentLifecycle::new(conn, kind)
        .list(ListScope::All)
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect();
    // Indexes past the end address an id that was never issued.
    let pick = |i: usize| ids.get(i).copied().unwrap_or(1_000 + i as i64);
    match step {
        Step::Create => ContentPlan::create(image(n)),
        Step::Delete(i) => ContentPlan::soft_delete(kind, pick(i)),
        Step::Restore(i) => ContentPlan::restore(kind, pick(i)),
        Step::Purge(i) => ContentPlan::purge(kind, pick(i)),
    }
}

fn snapshot(conn: &Connection) -> Vec<(i64, bool, u32)> {
    ContentLifecycle::new(conn, ContentKind::GalleryImage)
        .list(ListScope::All)
        .unwrap()
        .into_iter()
        .map(|item| (item.id, item.is_deleted, item.order))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // A plan that builds always executes, and a dry run never writes.
    #[test]
    fn built_plans_execute_and_dry_runs_do_not_write(
        steps in prop::collection::vec(step_strategy(), 1..30)
    ) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for (n, step) in steps.into_iter().enumerate() {
            let Ok(plan) = plan_for(&conn, step, n).build_plan(&conn) else {
                continue;
            };

            let before = snapshot(&conn);
            let dry = PlanExecutor::new(&conn).dry_run().execute(&plan).unwrap();
            prop_assert!(dry.content.is_none());
            prop_assert_eq!(&snapshot(&conn), &before);

            let result = PlanExecutor::new(&conn).execute(&plan);
            prop_assert!(result.is_ok(), "{:?} failed: {:?}", plan, result);
            prop_assert_eq!(result.unwrap().content.is_some(), !plan.is_empty());
        }
    }
}
