//! Round-trip and mismatch behavior of template export.

use chrono::{TimeZone, Utc};

use raci_export::{ExportPlan, MismatchReason, fill_template};
use raci_ingest::parse_template;
use raci_model::{
    ActivityId, CellRef, CellValue, RaciValue, RoleId, Sheet, SnapshotStore, Workbook, WorkshopId,
};

fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(*cell)
            }
        })
        .collect()
}

fn applications_template() -> Workbook {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "APPLICATIONS RACI",
        vec![
            text_row(&["Activity", "CIO", "CISO"]),
            text_row(&["Select OT vendor", "R", "A"]),
            text_row(&["Deploy patch", "R", "I"]),
        ],
    ));
    workbook.push_sheet(Sheet::with_rows(
        "Budget notes",
        vec![text_row(&["untouched", "passthrough"])],
    ));
    workbook
}

fn export_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap()
}

#[test]
fn export_writes_current_values_and_preserves_everything_else() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, mut store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);

    // The workshop flips CISO on "Select OT vendor" from A to C.
    let select = roster
        .activities
        .iter()
        .find(|activity| activity.text == "Select OT vendor")
        .unwrap();
    let ciso = roster
        .roles
        .iter()
        .find(|role| role.name == "CISO")
        .unwrap();
    store.set(select.id, ciso.id, Some(RaciValue::Consulted));

    let plan = ExportPlan::from_parsed(&parsed, &roster);
    assert!(plan.unmatched.is_empty());
    let outcome = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
    assert!(outcome.skipped.is_empty());

    let sheet = outcome.workbook.sheet("APPLICATIONS RACI").unwrap();
    assert_eq!(sheet.value(CellRef::new(2, 3)), &CellValue::text("C"));
    // Values that were never superseded keep their parsed content.
    assert_eq!(sheet.value(CellRef::new(2, 2)), &CellValue::text("R"));
    assert_eq!(sheet.value(CellRef::new(3, 2)), &CellValue::text("R"));
    // Unrelated sheets pass through untouched.
    assert_eq!(
        outcome.workbook.sheet("Budget notes").unwrap(),
        template.sheet("Budget notes").unwrap()
    );
}

#[test]
fn cleared_assignments_leave_template_seed_values_in_place() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, mut store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);

    let deploy = roster
        .activities
        .iter()
        .find(|activity| activity.text == "Deploy patch")
        .unwrap();
    let cio = roster.roles.iter().find(|role| role.name == "CIO").unwrap();
    store.set(deploy.id, cio.id, None);

    let plan = ExportPlan::from_parsed(&parsed, &roster);
    let outcome = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
    let sheet = outcome.workbook.sheet("APPLICATIONS RACI").unwrap();
    assert_eq!(sheet.value(CellRef::new(3, 2)), &CellValue::text("R"));
}

#[test]
fn round_trip_recovers_the_same_structure() {
    let template = applications_template();
    let bytes = template.to_bytes().unwrap();
    let parsed = parse_template(&bytes).unwrap();
    let (roster, mut store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);

    let select = roster
        .activities
        .iter()
        .find(|activity| activity.text == "Select OT vendor")
        .unwrap();
    let ciso = roster
        .roles
        .iter()
        .find(|role| role.name == "CISO")
        .unwrap();
    store.set(select.id, ciso.id, Some(RaciValue::Informed));

    let plan = ExportPlan::from_parsed(&parsed, &roster);
    let outcome = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
    let reparsed = parse_template(&outcome.to_bytes().unwrap()).unwrap();

    // Same domains, roles, activity labels, sections, and coordinates.
    assert_eq!(reparsed.domains, parsed.domains);
    assert_eq!(reparsed.roles, parsed.roles);
    assert_eq!(reparsed.activities.len(), parsed.activities.len());
    for (before, after) in parsed.activities.iter().zip(&reparsed.activities) {
        assert_eq!(after.text, before.text);
        assert_eq!(after.section, before.section);
        assert_eq!(after.cells, before.cells);
    }
    // Mapped coordinates now reflect the snapshot.
    let select_after = reparsed
        .activities
        .iter()
        .find(|activity| activity.text == "Select OT vendor")
        .unwrap();
    assert_eq!(
        select_after.seed_values[&raci_model::RoleKey::new("APPLICATIONS RACI", "CISO")],
        RaciValue::Informed
    );
}

#[test]
fn export_is_idempotent_for_a_fixed_timestamp() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);
    let plan = ExportPlan::from_parsed(&parsed, &roster);

    let first = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
    let second = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
    assert_eq!(first.to_bytes().unwrap(), second.to_bytes().unwrap());
}

#[test]
fn out_of_bounds_writes_are_skipped_and_reported() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);
    let plan = ExportPlan::from_parsed(&parsed, &roster);

    // The template lost a row since parsing.
    let mut shrunk = template.clone();
    shrunk
        .sheet_mut("APPLICATIONS RACI")
        .unwrap()
        .rows
        .truncate(2);

    let outcome = fill_template(&shrunk, &plan, &store, WorkshopId(1), export_time());
    let out_of_bounds: Vec<_> = outcome
        .skipped
        .iter()
        .filter(|skip| skip.reason == MismatchReason::OutOfBounds)
        .collect();
    assert_eq!(out_of_bounds.len(), 2);
    assert!(out_of_bounds.iter().all(|skip| skip.cell.row == 3));
    // Remaining writes still landed.
    let sheet = outcome.workbook.sheet("APPLICATIONS RACI").unwrap();
    assert_eq!(sheet.value(CellRef::new(2, 2)), &CellValue::text("R"));
}

#[test]
fn missing_sheet_reports_every_affected_write() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);
    let plan = ExportPlan::from_parsed(&parsed, &roster);

    let mut renamed = template.clone();
    renamed.sheet_mut("APPLICATIONS RACI").unwrap().name = "APPS RACI".to_string();

    let outcome = fill_template(&renamed, &plan, &store, WorkshopId(1), export_time());
    // Four seeded writes, all skipped.
    assert_eq!(outcome.skipped.len(), 4);
    assert!(
        outcome
            .skipped
            .iter()
            .all(|skip| skip.reason == MismatchReason::MissingSheet)
    );
}

#[test]
fn provenance_sheet_records_workshop_and_timestamp() {
    let template = applications_template();
    let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
    let (roster, store) = SnapshotStore::from_parsed(WorkshopId(42), &parsed);
    let plan = ExportPlan::from_parsed(&parsed, &roster);

    let outcome = fill_template(&template, &plan, &store, WorkshopId(42), export_time());
    let provenance = outcome.workbook.sheet("Outputs").unwrap();
    assert_eq!(
        provenance.value(CellRef::new(1, 2)),
        &CellValue::text("2024-05-14T09:30:00Z")
    );
    assert_eq!(provenance.value(CellRef::new(2, 2)), &CellValue::text("42"));
    assert!(!provenance.value(CellRef::new(3, 2)).is_empty());

    // The appended sheet is ignored on re-parse.
    let reparsed = parse_template(&outcome.to_bytes().unwrap()).unwrap();
    assert_eq!(reparsed.domains.len(), 1);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn raci_value() -> impl Strategy<Value = RaciValue> {
        prop_oneof![
            Just(RaciValue::Responsible),
            Just(RaciValue::Accountable),
            Just(RaciValue::Consulted),
            Just(RaciValue::Informed),
        ]
    }

    proptest! {
        /// Whatever snapshot is written, re-parsing the export recovers
        /// the snapshot at the mapped coordinates and the original
        /// structure everywhere else.
        #[test]
        fn parse_export_parse_recovers_snapshot(
            values in proptest::collection::vec(proptest::option::of(raci_value()), 4)
        ) {
            let template = applications_template();
            let parsed = parse_template(&template.to_bytes().unwrap()).unwrap();
            let (roster, mut store) = SnapshotStore::from_parsed(WorkshopId(1), &parsed);

            let mut pairs = Vec::new();
            for activity in &roster.activities {
                for role in &roster.roles {
                    pairs.push((activity.id, role.id));
                }
            }
            for ((activity, role), value) in pairs.iter().zip(&values) {
                store.set(*activity, *role, *value);
            }

            let plan = ExportPlan::from_parsed(&parsed, &roster);
            let outcome = fill_template(&template, &plan, &store, WorkshopId(1), export_time());
            prop_assert!(outcome.skipped.is_empty());
            let reparsed = parse_template(&outcome.to_bytes().unwrap()).unwrap();

            prop_assert_eq!(&reparsed.roles, &parsed.roles);
            prop_assert_eq!(reparsed.activities.len(), parsed.activities.len());

            // Every non-empty snapshot entry is what the re-parse sees.
            for (activity, role, value) in store.assignments() {
                let roster_activity = roster.activity(activity).unwrap();
                let roster_role = roster.role(role).unwrap();
                let reparsed_activity = reparsed
                    .activities
                    .iter()
                    .find(|candidate| candidate.text == roster_activity.text)
                    .unwrap();
                prop_assert_eq!(
                    reparsed_activity.seed_values.get(&roster_role.key).copied(),
                    Some(value)
                );
            }
        }
    }
}
