//! Template write-back.
//!
//! Fills current assignment values into a copy of the original workbook
//! at the coordinates captured during parsing, leaving every other cell
//! exactly as parsed. The original is never mutated; export always
//! returns a new workbook.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use raci_model::{
    ActivityId, AssignmentValues, CellRef, CellValue, RoleId, Sheet, Workbook, WorkshopId,
};

use crate::ExportError;
use crate::plan::ExportPlan;

/// Why a single write was skipped. Both cases mean the template's
/// structure no longer matches the coordinates captured at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    MissingSheet,
    OutOfBounds,
}

/// One write that could not be applied. Non-fatal: the export completes
/// and reports these alongside the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMismatch {
    pub activity: ActivityId,
    pub role: RoleId,
    pub sheet_name: String,
    pub cell: CellRef,
    pub reason: MismatchReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub workbook: Workbook,
    pub skipped: Vec<TemplateMismatch>,
}

impl ExportOutcome {
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        Ok(self.workbook.to_bytes()?)
    }
}

/// Writes the current assignment snapshot into a copy of `template`.
///
/// Cells with a non-empty current value are overwritten; cells whose
/// assignment is absent keep whatever the template held at parse time,
/// deliberately preserving seed values that were never superseded.
/// Identical inputs (including `exported_at`) produce identical output.
pub fn fill_template(
    template: &Workbook,
    plan: &ExportPlan,
    values: &impl AssignmentValues,
    workshop: WorkshopId,
    exported_at: DateTime<Utc>,
) -> ExportOutcome {
    let mut workbook = template.clone();
    let mut skipped = Vec::new();
    let mut written = 0usize;

    for row in &plan.rows {
        for (role, cell) in &row.cells {
            let Some(value) = values.value_for(row.activity, *role) else {
                continue;
            };
            let Some(sheet) = workbook.sheet_mut(&row.sheet_name) else {
                skipped.push(TemplateMismatch {
                    activity: row.activity,
                    role: *role,
                    sheet_name: row.sheet_name.clone(),
                    cell: *cell,
                    reason: MismatchReason::MissingSheet,
                });
                continue;
            };
            if !sheet.contains(*cell) {
                skipped.push(TemplateMismatch {
                    activity: row.activity,
                    role: *role,
                    sheet_name: row.sheet_name.clone(),
                    cell: *cell,
                    reason: MismatchReason::OutOfBounds,
                });
                continue;
            }
            sheet.set_value(*cell, CellValue::text(value.as_str()));
            written += 1;
        }
    }

    if !skipped.is_empty() {
        warn!(
            workshop = %workshop,
            skipped = skipped.len(),
            "template structure changed since parsing; some writes skipped"
        );
    }
    debug!(workshop = %workshop, written, "filled template");

    workbook.push_sheet(provenance_sheet(&workbook, workshop, exported_at));

    ExportOutcome { workbook, skipped }
}

/// Provenance is appended as its own sheet, never merged into data
/// sheets. The name is suffixed if the template already uses it.
fn provenance_sheet(workbook: &Workbook, workshop: WorkshopId, exported_at: DateTime<Utc>) -> Sheet {
    let mut sheet = Sheet::new(provenance_sheet_name(workbook));
    sheet.push_row(vec![
        CellValue::text("Exported"),
        CellValue::text(exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
    ]);
    sheet.push_row(vec![
        CellValue::text("Workshop"),
        CellValue::text(workshop.to_string()),
    ]);
    sheet.push_row(vec![
        CellValue::text("Notes"),
        CellValue::text(
            "RACI cells were auto-filled from workshop assignments; all other content is source data",
        ),
    ]);
    sheet
}

fn provenance_sheet_name(workbook: &Workbook) -> String {
    const BASE: &str = "Outputs";
    if workbook.sheet(BASE).is_none() {
        return BASE.to_string();
    }
    let mut counter = 2usize;
    loop {
        let candidate = format!("{BASE} ({counter})");
        if workbook.sheet(&candidate).is_none() {
            return candidate;
        }
        counter += 1;
    }
}
