//! Read accessors over the external assignment store, plus an in-memory
//! reference implementation.
//!
//! The core never persists assignments; validation and export read a
//! consistent snapshot through these traits. Callers are responsible for
//! serializing snapshot capture against concurrent bulk updates.

use std::collections::BTreeMap;

use crate::{
    Activity, ActivityId, ParsedTemplate, RaciValue, RoleId, WorkshopId, WorkshopRoster,
    roster::{RosterActivity, RosterRole},
};

/// Per-activity snapshot reads used by validation.
pub trait AssignmentSource {
    /// Current assignments for one activity, as (role, value) pairs.
    fn assignments_for(&self, activity: ActivityId) -> Vec<(RoleId, RaciValue)>;

    /// Recommended baseline for one activity. Empty when no baseline was
    /// supplied.
    fn recommended_for(&self, _activity: ActivityId) -> Vec<(RoleId, RaciValue)> {
        Vec::new()
    }
}

/// Point lookups used by export.
pub trait AssignmentValues {
    fn value_for(&self, activity: ActivityId, role: RoleId) -> Option<RaciValue>;
}

/// In-memory snapshot of one workshop's assignments and recommended
/// baseline. Deterministic iteration order throughout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    assignments: BTreeMap<(ActivityId, RoleId), RaciValue>,
    recommended: BTreeMap<(ActivityId, RoleId), RaciValue>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster and a store seeded from a parsed template.
    ///
    /// Ids are assigned sequentially in parse order (activities by row
    /// order across domains, roles by detection order), and each
    /// activity's seed values become initial assignments.
    pub fn from_parsed(workshop: WorkshopId, parsed: &ParsedTemplate) -> (WorkshopRoster, Self) {
        let roles: Vec<RosterRole> = parsed
            .roles
            .iter()
            .enumerate()
            .map(|(idx, role)| RosterRole {
                id: RoleId(idx as u64 + 1),
                key: role.key.clone(),
                name: role.name.clone(),
            })
            .collect();
        let activities: Vec<RosterActivity> = parsed
            .activities
            .iter()
            .enumerate()
            .map(|(idx, activity)| RosterActivity {
                id: ActivityId(idx as u64 + 1),
                sheet_name: activity.sheet_name.clone(),
                text: activity.text.clone(),
                order_index: activity.order_index,
            })
            .collect();

        let mut store = Self::new();
        for (activity, roster_activity) in parsed.activities.iter().zip(&activities) {
            store.seed_from(activity, roster_activity.id, &roles);
        }

        (
            WorkshopRoster {
                workshop,
                activities,
                roles,
            },
            store,
        )
    }

    fn seed_from(&mut self, activity: &Activity, id: ActivityId, roles: &[RosterRole]) {
        for (key, value) in &activity.seed_values {
            if let Some(role) = roles.iter().find(|role| &role.key == key) {
                self.assignments.insert((id, role.id), *value);
            }
        }
    }

    /// Sets or clears one assignment.
    pub fn set(&mut self, activity: ActivityId, role: RoleId, value: Option<RaciValue>) {
        match value {
            Some(value) => {
                self.assignments.insert((activity, role), value);
            }
            None => {
                self.assignments.remove(&(activity, role));
            }
        }
    }

    pub fn set_recommended(&mut self, activity: ActivityId, role: RoleId, value: RaciValue) {
        self.recommended.insert((activity, role), value);
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn assignments(&self) -> impl Iterator<Item = (ActivityId, RoleId, RaciValue)> + '_ {
        self.assignments
            .iter()
            .map(|(&(activity, role), &value)| (activity, role, value))
    }
}

impl AssignmentSource for SnapshotStore {
    fn assignments_for(&self, activity: ActivityId) -> Vec<(RoleId, RaciValue)> {
        self.assignments
            .range((activity, RoleId(u64::MIN))..=(activity, RoleId(u64::MAX)))
            .map(|(&(_, role), &value)| (role, value))
            .collect()
    }

    fn recommended_for(&self, activity: ActivityId) -> Vec<(RoleId, RaciValue)> {
        self.recommended
            .range((activity, RoleId(u64::MIN))..=(activity, RoleId(u64::MAX)))
            .map(|(&(_, role), &value)| (role, value))
            .collect()
    }
}

impl AssignmentValues for SnapshotStore {
    fn value_for(&self, activity: ActivityId, role: RoleId) -> Option<RaciValue> {
        self.assignments.get(&(activity, role)).copied()
    }
}
