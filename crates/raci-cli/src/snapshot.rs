//! Assignment snapshot overlay files.
//!
//! The CLI has no persistent store: each command seeds an in-memory
//! snapshot from the template's own cell values, then overlays the
//! workshop's current state from a JSON file. Entries address activities
//! and roles by sheet and display text, the way facilitators see them.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use raci_model::{RaciValue, SnapshotStore, WorkshopRoster};

/// One `(activity, role)` entry. `value: null` clears an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub sheet: String,
    pub activity: String,
    pub role: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub assignments: Vec<SnapshotEntry>,
    #[serde(default)]
    pub recommended: Vec<SnapshotEntry>,
}

impl SnapshotFile {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("snapshot file is not valid JSON")
    }

    /// Applies assignments and recommended entries to the store.
    ///
    /// References that do not resolve against the roster are errors:
    /// the file talks about a different template.
    pub fn apply(&self, roster: &WorkshopRoster, store: &mut SnapshotStore) -> Result<()> {
        for entry in &self.assignments {
            let (activity, role) = resolve(roster, entry)?;
            let value = entry
                .value
                .as_deref()
                .map(str::parse::<RaciValue>)
                .transpose()
                .with_context(|| {
                    format!(
                        "assignment for {:?} / {:?} has an invalid value",
                        entry.activity, entry.role
                    )
                })?;
            store.set(activity, role, value);
        }
        for entry in &self.recommended {
            let (activity, role) = resolve(roster, entry)?;
            let Some(raw) = entry.value.as_deref() else {
                bail!(
                    "recommended entry for {:?} / {:?} requires a value",
                    entry.activity,
                    entry.role
                );
            };
            let value = raw.parse::<RaciValue>().with_context(|| {
                format!(
                    "recommended entry for {:?} / {:?} has an invalid value",
                    entry.activity, entry.role
                )
            })?;
            store.set_recommended(activity, role, value);
        }
        Ok(())
    }
}

fn resolve(
    roster: &WorkshopRoster,
    entry: &SnapshotEntry,
) -> Result<(raci_model::ActivityId, raci_model::RoleId)> {
    let activity = roster
        .activities
        .iter()
        .find(|activity| activity.sheet_name == entry.sheet && activity.text == entry.activity)
        .with_context(|| {
            format!(
                "no activity {:?} on sheet {:?} in this template",
                entry.activity, entry.sheet
            )
        })?;
    let role_key = raci_model::RoleKey::new(&entry.sheet, &entry.role);
    let role = roster
        .roles
        .iter()
        .find(|role| role.key == role_key)
        .with_context(|| {
            format!(
                "no role {:?} on sheet {:?} in this template",
                entry.role, entry.sheet
            )
        })?;
    Ok((activity.id, role.id))
}
