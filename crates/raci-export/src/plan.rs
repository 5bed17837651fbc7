//! Export plan: parsed coordinates joined with store identities.
//!
//! Roster rows are matched to parsed activities by (sheet, label text).
//! Text equality is the only re-identification the template offers: if a
//! label changed between parse and export, the row cannot be located and
//! is reported as unmatched rather than written to a guessed position.
//! A durable fix would need stable activity identifiers embedded in the
//! template.

use serde::{Deserialize, Serialize};

use raci_model::{ActivityId, CellRef, ParsedTemplate, RoleId, WorkshopRoster};

/// One activity's writes: the store id plus every (role, coordinate)
/// pair captured at parse time that resolved to a roster role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    pub activity: ActivityId,
    pub sheet_name: String,
    pub text: String,
    pub cells: Vec<(RoleId, CellRef)>,
}

/// A parsed activity row no roster entry claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedActivity {
    pub sheet_name: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportPlan {
    pub rows: Vec<PlanRow>,
    pub unmatched: Vec<UnmatchedActivity>,
}

impl ExportPlan {
    /// Joins a parsed template with a workshop roster.
    ///
    /// Role keys with no roster counterpart are skipped per cell; an
    /// activity with no roster counterpart is recorded in `unmatched`.
    pub fn from_parsed(parsed: &ParsedTemplate, roster: &WorkshopRoster) -> Self {
        let mut plan = ExportPlan::default();
        for activity in &parsed.activities {
            let matched = roster.activities.iter().find(|candidate| {
                candidate.sheet_name == activity.sheet_name && candidate.text == activity.text
            });
            let Some(matched) = matched else {
                plan.unmatched.push(UnmatchedActivity {
                    sheet_name: activity.sheet_name.clone(),
                    text: activity.text.clone(),
                });
                continue;
            };
            let cells = activity
                .cells
                .iter()
                .filter_map(|(key, cell)| {
                    roster
                        .roles
                        .iter()
                        .find(|role| &role.key == key)
                        .map(|role| (role.id, *cell))
                })
                .collect();
            plan.rows.push(PlanRow {
                activity: matched.id,
                sheet_name: activity.sheet_name.clone(),
                text: activity.text.clone(),
                cells,
            });
        }
        plan
    }
}
