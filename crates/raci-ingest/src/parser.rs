//! Matrix template parser.
//!
//! Converts a workbook into [`ParsedTemplate`] records. Sheet selection
//! and the role-header / section-header detection below are best-effort
//! heuristics over human-authored spreadsheets: layouts vary, and the
//! parser prefers degrading to empty results over guessing stricter
//! rules.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use raci_model::{
    Activity, CellRef, CellValue, Domain, ParsedTemplate, RaciValue, Role, RoleKey, Sheet,
    Workbook,
};

use crate::error::{IngestError, Result};
use crate::fingerprint::sha256_hex;

/// Opens and parses a serialized template.
///
/// The only fatal failure is a byte stream that is not a structured
/// workbook at all; everything after that degrades per sheet.
pub fn parse_template(bytes: &[u8]) -> Result<ParsedTemplate> {
    let workbook =
        Workbook::from_bytes(bytes).map_err(|source| IngestError::UnreadableTemplate { source })?;
    Ok(parse_workbook(&workbook, sha256_hex(bytes)))
}

/// Parses an already-opened workbook against a precomputed fingerprint.
pub fn parse_workbook(workbook: &Workbook, fingerprint: String) -> ParsedTemplate {
    let mut parsed = ParsedTemplate {
        fingerprint,
        domains: Vec::new(),
        roles: Vec::new(),
        activities: Vec::new(),
        instructions: BTreeMap::new(),
        lists: BTreeMap::new(),
    };

    for sheet in &workbook.sheets {
        if is_matrix_sheet(&sheet.name) {
            parse_matrix_sheet(sheet, &mut parsed);
        }
    }
    for sheet in &workbook.sheets {
        if is_instruction_sheet(&sheet.name) {
            parsed
                .instructions
                .insert(sheet.name.clone(), instruction_text(sheet));
        }
        if is_list_sheet(&sheet.name) {
            parsed.lists.insert(sheet.name.clone(), list_values(sheet));
        }
    }

    debug!(
        domains = parsed.domains.len(),
        roles = parsed.roles.len(),
        activities = parsed.activities.len(),
        "parsed template"
    );
    parsed
}

fn is_matrix_sheet(name: &str) -> bool {
    name.to_lowercase().ends_with("raci")
}

fn is_instruction_sheet(name: &str) -> bool {
    name.to_lowercase().starts_with("instruction")
}

fn is_list_sheet(name: &str) -> bool {
    name.to_lowercase().starts_with("list")
}

/// The role header row is the first row with at least one non-empty
/// cell in any column after the first. Returns the row index and the
/// detected roles as (name, absolute column) pairs.
fn detect_role_header(sheet: &Sheet) -> Option<(u32, Vec<(String, u32)>)> {
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let row_no = row_idx as u32 + 1;
        let mut roles = Vec::new();
        for (col_idx, cell) in row.iter().enumerate().skip(1) {
            if let Some(name) = cell.as_trimmed_text() {
                roles.push((name, col_idx as u32 + 1));
            }
        }
        if !roles.is_empty() {
            return Some((row_no, roles));
        }
    }
    None
}

fn parse_matrix_sheet(sheet: &Sheet, parsed: &mut ParsedTemplate) {
    let Some((header_row, headers)) = detect_role_header(sheet) else {
        warn!(sheet = %sheet.name, "matrix sheet has no role header row; skipping");
        return;
    };

    parsed.domains.push(Domain {
        sheet_name: sheet.name.clone(),
        display_name: sheet.name.clone(),
        order_index: parsed.domains.len(),
    });

    let roles: Vec<Role> = headers
        .iter()
        .enumerate()
        .map(|(idx, (name, column))| Role {
            name: name.clone(),
            key: RoleKey::new(&sheet.name, name),
            sheet_name: sheet.name.clone(),
            column: *column,
            order_index: idx + 1,
        })
        .collect();

    let mut current_section: Option<String> = None;
    let mut activity_count = 0usize;

    for row_no in header_row + 1..=sheet.row_count() {
        let label = sheet.value(CellRef::new(row_no, 1)).as_trimmed_text();
        let Some(label) = label else {
            // Blank or separator row; also skips stray values with no label.
            continue;
        };

        if !row_has_values(sheet, row_no) {
            current_section = Some(label);
            continue;
        }

        let mut cells = BTreeMap::new();
        let mut seed_values = BTreeMap::new();
        for role in &roles {
            let cell = CellRef::new(row_no, role.column);
            cells.insert(role.key.clone(), cell);
            if let Some(text) = sheet.value(cell).as_trimmed_text() {
                match text.parse::<RaciValue>() {
                    Ok(value) => {
                        seed_values.insert(role.key.clone(), value);
                    }
                    Err(_) => {
                        warn!(
                            sheet = %sheet.name,
                            row = row_no,
                            role = %role.name,
                            value = %text,
                            "ignoring seed cell that is not a RACI value"
                        );
                    }
                }
            }
        }

        parsed.activities.push(Activity {
            sheet_name: sheet.name.clone(),
            text: label,
            section: current_section.clone(),
            order_index: activity_count,
            cells,
            seed_values,
        });
        activity_count += 1;
    }

    parsed.roles.extend(roles);
}

/// True when any cell after the label column is non-empty. A labeled row
/// with no values is a section header, never an activity.
fn row_has_values(sheet: &Sheet, row_no: u32) -> bool {
    let Some(row) = sheet.rows.get(row_no as usize - 1) else {
        return false;
    };
    row.iter().skip(1).any(|cell| !cell.is_empty())
}

/// Instruction sheets are captured verbatim: non-empty cells of each row
/// joined with spaces, non-empty lines joined with newlines.
fn instruction_text(sheet: &Sheet) -> String {
    let mut lines = Vec::new();
    for row in &sheet.rows {
        let line = row
            .iter()
            .filter_map(CellValue::as_trimmed_text)
            .collect::<Vec<_>>()
            .join(" ");
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// List sheets are captured as the ordered non-empty values of the first
/// column.
fn list_values(sheet: &Sheet) -> Vec<String> {
    sheet
        .rows
        .iter()
        .filter_map(|row| row.first().and_then(CellValue::as_trimmed_text))
        .collect()
}
