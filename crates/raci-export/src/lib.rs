#![deny(unsafe_code)]

pub mod actions;
pub mod error;
pub mod fill;
pub mod plan;

pub use actions::{actions_from_issues, write_actions_csv};
pub use error::ExportError;
pub use fill::{ExportOutcome, MismatchReason, TemplateMismatch, fill_template};
pub use plan::{ExportPlan, PlanRow, UnmatchedActivity};
