//! Parsed template records.
//!
//! These are the parser's output: immutable descriptions of what one
//! template contained, positioned precisely enough to write values back
//! later. Assignment state lives in the external store, not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{CellRef, RaciValue, RoleKey};

/// One matrix sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Sheet name, which doubles as the domain identifier.
    pub sheet_name: String,
    pub display_name: String,
    /// Discovery order among parsed matrix sheets.
    pub order_index: usize,
}

/// One accountable/responsible party, scoped to a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub key: RoleKey,
    pub sheet_name: String,
    /// Absolute column of the role's header cell, preserved for
    /// coordinate mapping.
    pub column: u32,
    /// 1-based position among the roles detected on this sheet.
    pub order_index: usize,
}

/// Association from each role in a domain to the absolute coordinate
/// where that role's value is written for one activity.
pub type CellMap = BTreeMap<RoleKey, CellRef>;

/// One matrix row representing a unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub sheet_name: String,
    pub text: String,
    /// Nearest preceding section header on the same sheet, if any.
    pub section: Option<String>,
    /// Monotonic within the sheet.
    pub order_index: usize,
    /// Captured for every detected role, value present or not. Only
    /// meaningful against the exact template it was parsed from.
    pub cells: CellMap,
    /// Non-empty values found at parse time. These seed downstream
    /// assignment creation; they are not the authoritative store.
    pub seed_values: BTreeMap<RoleKey, RaciValue>,
}

/// Everything the parser extracted from one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTemplate {
    /// SHA-256 over the raw workbook bytes; stable identity for change
    /// detection by the external store.
    pub fingerprint: String,
    pub domains: Vec<Domain>,
    pub roles: Vec<Role>,
    pub activities: Vec<Activity>,
    /// Free text captured from instruction sheets, keyed by sheet name.
    pub instructions: BTreeMap<String, String>,
    /// Ordered first-column values captured from list sheets.
    pub lists: BTreeMap<String, Vec<String>>,
}

impl ParsedTemplate {
    /// Roles belonging to one domain, in detection order.
    pub fn roles_for(&self, sheet_name: &str) -> impl Iterator<Item = &Role> {
        self.roles
            .iter()
            .filter(move |role| role.sheet_name == sheet_name)
    }

    /// Activities belonging to one domain, in row order.
    pub fn activities_for(&self, sheet_name: &str) -> impl Iterator<Item = &Activity> {
        self.activities
            .iter()
            .filter(move |activity| activity.sheet_name == sheet_name)
    }
}
