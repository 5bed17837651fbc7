//! Integration tests for template parsing.

use raci_ingest::{IngestError, parse_template};
use raci_model::{CellRef, CellValue, RaciValue, RoleKey, Sheet, Workbook};

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
    workbook
}

#[test]
fn parses_the_applications_scenario() {
    let bytes = applications_template().to_bytes().unwrap();
    let parsed = parse_template(&bytes).unwrap();

    assert_eq!(parsed.domains.len(), 1);
    assert_eq!(parsed.domains[0].sheet_name, "APPLICATIONS RACI");
    assert_eq!(parsed.domains[0].order_index, 0);

    assert_eq!(parsed.roles.len(), 2);
    assert_eq!(parsed.roles[0].name, "CIO");
    assert_eq!(parsed.roles[0].column, 2);
    assert_eq!(parsed.roles[0].order_index, 1);
    assert_eq!(parsed.roles[1].name, "CISO");
    assert_eq!(parsed.roles[1].column, 3);
    assert_eq!(parsed.roles[1].order_index, 2);

    assert_eq!(parsed.activities.len(), 2);
    let select = &parsed.activities[0];
    assert_eq!(select.text, "Select OT vendor");
    assert_eq!(select.order_index, 0);
    let cio = RoleKey::new("APPLICATIONS RACI", "CIO");
    let ciso = RoleKey::new("APPLICATIONS RACI", "CISO");
    assert_eq!(select.cells[&cio], CellRef::new(2, 2));
    assert_eq!(select.cells[&ciso], CellRef::new(2, 3));
    assert_eq!(select.seed_values[&cio], RaciValue::Responsible);
    assert_eq!(select.seed_values[&ciso], RaciValue::Accountable);

    let deploy = &parsed.activities[1];
    assert_eq!(deploy.text, "Deploy patch");
    assert_eq!(deploy.order_index, 1);
    assert_eq!(deploy.seed_values[&ciso], RaciValue::Informed);
}

#[test]
fn section_headers_never_become_activities() {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "OPS RACI",
        vec![
            text_row(&["Activity", "Lead", "Engineer"]),
            text_row(&["Governance"]),
            text_row(&["Approve budget", "A", "C"]),
            text_row(&[""]),
            text_row(&["Operations"]),
            text_row(&["Patch systems", "", "R"]),
        ],
    ));
    let parsed = parse_template(&workbook.to_bytes().unwrap()).unwrap();

    assert_eq!(parsed.activities.len(), 2);
    assert_eq!(parsed.activities[0].text, "Approve budget");
    assert_eq!(parsed.activities[0].section.as_deref(), Some("Governance"));
    assert_eq!(parsed.activities[1].text, "Patch systems");
    assert_eq!(parsed.activities[1].section.as_deref(), Some("Operations"));
    assert!(
        parsed
            .activities
            .iter()
            .all(|activity| activity.text != "Governance" && activity.text != "Operations")
    );
}

#[test]
fn cell_map_covers_roles_without_values() {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "NET RACI",
        vec![
            text_row(&["Activity", "CIO", "CISO", "Vendor"]),
            text_row(&["Segment network", "R"]),
        ],
    ));
    let parsed = parse_template(&workbook.to_bytes().unwrap()).unwrap();
    let activity = &parsed.activities[0];

    // Every detected role gets a coordinate, value present or not.
    assert_eq!(activity.cells.len(), 3);
    assert_eq!(
        activity.cells[&RoleKey::new("NET RACI", "Vendor")],
        CellRef::new(2, 4)
    );
    assert_eq!(activity.seed_values.len(), 1);
}

#[test]
fn non_raci_seed_values_are_dropped_not_fatal() {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "APP RACI",
        vec![
            text_row(&["Activity", "CIO"]),
            text_row(&["Select vendor", "maybe?"]),
        ],
    ));
    let parsed = parse_template(&workbook.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed.activities.len(), 1);
    assert!(parsed.activities[0].seed_values.is_empty());
}

#[test]
fn instruction_and_list_sheets_are_captured() {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "Instructions",
        vec![
            text_row(&["Fill one letter", "per cell"]),
            text_row(&[""]),
            text_row(&["R A C or I"]),
        ],
    ));
    workbook.push_sheet(Sheet::with_rows(
        "List of values",
        vec![
            text_row(&["R", "ignored"]),
            text_row(&["A"]),
            text_row(&[""]),
            text_row(&["C"]),
        ],
    ));
    workbook.push_sheet(Sheet::with_rows("Scratch", vec![text_row(&["ignored"])]));

    let parsed = parse_template(&workbook.to_bytes().unwrap()).unwrap();
    assert_eq!(
        parsed.instructions["Instructions"],
        "Fill one letter per cell\nR A C or I"
    );
    assert_eq!(parsed.lists["List of values"], vec!["R", "A", "C"]);
    assert!(parsed.domains.is_empty());
}

#[test]
fn multiple_matrix_sheets_keep_discovery_order_and_scoped_roles() {
    let mut workbook = Workbook::new();
    workbook.push_sheet(Sheet::with_rows(
        "APPS RACI",
        vec![
            text_row(&["Activity", "CIO"]),
            text_row(&["Select vendor", "A"]),
        ],
    ));
    workbook.push_sheet(Sheet::with_rows(
        "NETWORK RACI",
        vec![
            text_row(&["Activity", "CIO"]),
            text_row(&["Approve firewall rules", "R"]),
        ],
    ));
    let parsed = parse_template(&workbook.to_bytes().unwrap()).unwrap();

    assert_eq!(parsed.domains.len(), 2);
    assert_eq!(parsed.domains[0].order_index, 0);
    assert_eq!(parsed.domains[1].order_index, 1);
    // Same title, two domains, two distinct role records.
    assert_eq!(parsed.roles.len(), 2);
    assert_ne!(parsed.roles[0].key, parsed.roles[1].key);
    // Activity order indexes are per sheet.
    assert_eq!(parsed.activities[0].order_index, 0);
    assert_eq!(parsed.activities[1].order_index, 0);
}

#[test]
fn unreadable_bytes_are_fatal() {
    let error = parse_template(b"\x1f\x8b definitely not a workbook").unwrap_err();
    assert!(matches!(error, IngestError::UnreadableTemplate { .. }));
}

#[test]
fn fingerprint_tracks_content() {
    let bytes_a = applications_template().to_bytes().unwrap();
    let mut changed = applications_template();
    changed
        .sheet_mut("APPLICATIONS RACI")
        .unwrap()
        .set_value(CellRef::new(2, 2), CellValue::text("C"));
    let bytes_b = changed.to_bytes().unwrap();

    let parsed_a = parse_template(&bytes_a).unwrap();
    let parsed_a_again = parse_template(&bytes_a).unwrap();
    let parsed_b = parse_template(&bytes_b).unwrap();

    assert_eq!(parsed_a.fingerprint, parsed_a_again.fingerprint);
    assert_ne!(parsed_a.fingerprint, parsed_b.fingerprint);
}
