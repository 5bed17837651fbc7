//! Terminal summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use raci_model::{ParsedTemplate, Severity, WorkshopRoster};
use raci_validate::ValidationRun;

pub fn print_parse_summary(parsed: &ParsedTemplate) {
    println!("Fingerprint: {}", parsed.fingerprint);
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Roles"),
        header_cell("Activities"),
        header_cell("Sections"),
    ]);
    align_right(&mut table, 1);
    align_right(&mut table, 2);
    align_right(&mut table, 3);
    for domain in &parsed.domains {
        let roles = parsed.roles_for(&domain.sheet_name).count();
        let activities: Vec<_> = parsed.activities_for(&domain.sheet_name).collect();
        let sections = activities
            .iter()
            .filter_map(|activity| activity.section.as_deref())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        table.add_row(vec![
            Cell::new(&domain.display_name),
            Cell::new(roles),
            Cell::new(activities.len()),
            Cell::new(sections),
        ]);
    }
    println!("{table}");
    if !parsed.instructions.is_empty() {
        println!(
            "Instruction sheets: {}",
            parsed
                .instructions
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !parsed.lists.is_empty() {
        println!(
            "List sheets: {}",
            parsed.lists.keys().cloned().collect::<Vec<_>>().join(", ")
        );
    }
}

pub fn print_validation_summary(roster: &WorkshopRoster, run: &ValidationRun) {
    if run.issues.is_empty() {
        println!("No issues found across {} activities.", roster.activities.len());
        return;
    }
    let mut table = Table::new();
    apply_style(&mut table);
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Type"),
        header_cell("Activity"),
        header_cell("Role"),
        header_cell("Description"),
    ]);
    for issue in &run.issues {
        let activity = roster
            .activity(issue.activity)
            .map(|activity| activity.text.clone())
            .unwrap_or_else(|| issue.activity.to_string());
        let role = issue
            .role
            .map(|role| roster.role_name(role))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.issue_type.code()),
            Cell::new(activity),
            Cell::new(role),
            Cell::new(&issue.description),
        ]);
    }
    println!("{table}");
    println!(
        "{} issues ({} high severity)",
        run.summary.issues_created,
        run.summary.high_severity_count()
    );
}

fn apply_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_right(table: &mut Table, index: usize) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.as_str());
    match severity {
        Severity::High => cell.fg(Color::Red),
        Severity::Medium => cell.fg(Color::Yellow),
        Severity::Low => cell.fg(Color::Blue),
    }
}
