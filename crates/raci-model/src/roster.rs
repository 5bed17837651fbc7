//! Workshop roster: the identified activities and roles one validation
//! or export run operates over.
//!
//! The external store owns ids; a roster is the store's snapshot of one
//! workshop handed to the core.

use serde::{Deserialize, Serialize};

use crate::{ActivityId, RoleId, RoleKey, WorkshopId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterActivity {
    pub id: ActivityId,
    /// Domain identifier (matrix sheet name).
    pub sheet_name: String,
    pub text: String,
    pub order_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRole {
    pub id: RoleId,
    pub key: RoleKey,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopRoster {
    pub workshop: WorkshopId,
    /// Grouped by domain, in order-index order.
    pub activities: Vec<RosterActivity>,
    pub roles: Vec<RosterRole>,
}

impl WorkshopRoster {
    pub fn activity(&self, id: ActivityId) -> Option<&RosterActivity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn role(&self, id: RoleId) -> Option<&RosterRole> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn contains_activity(&self, id: ActivityId) -> bool {
        self.activity(id).is_some()
    }

    pub fn contains_role(&self, id: RoleId) -> bool {
        self.role(id).is_some()
    }

    /// Display name for a role, falling back to the raw id for dangling
    /// references in diagnostics.
    pub fn role_name(&self, id: RoleId) -> String {
        self.role(id)
            .map(|role| role.name.clone())
            .unwrap_or_else(|| format!("role {id}"))
    }
}
