#![deny(unsafe_code)]

pub mod enums;
pub mod error;
pub mod ids;
pub mod issue;
pub mod matrix;
pub mod roster;
pub mod store;
pub mod workbook;

pub use enums::{RaciValue, Severity};
pub use error::ModelError;
pub use ids::{ActivityId, DomainId, RoleId, RoleKey, WorkshopId};
pub use issue::{Action, ActionStatus, Issue, IssueType, ValidationSummary};
pub use matrix::{Activity, CellMap, Domain, ParsedTemplate, Role};
pub use roster::{RosterActivity, RosterRole, WorkshopRoster};
pub use store::{AssignmentSource, AssignmentValues, SnapshotStore};
pub use workbook::{CellRef, CellValue, Sheet, Workbook};
