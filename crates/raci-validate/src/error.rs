use thiserror::Error;

use raci_model::{ActivityId, RoleId};

/// Which external record carried the dangling reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotRecord {
    Assignment,
    Recommended,
}

impl std::fmt::Display for SnapshotRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotRecord::Assignment => f.write_str("assignment"),
            SnapshotRecord::Recommended => f.write_str("recommended baseline entry"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidateError {
    /// A snapshot row references a role id that is not in the supplied
    /// roster. Business-rule violations are issues, never errors; this
    /// is an integration bug on the caller's side and is fatal.
    #[error("integrity fault: {record} for activity {activity} references unknown role {role}")]
    IntegrityFault {
        record: SnapshotRecord,
        activity: ActivityId,
        role: RoleId,
    },
}

pub type Result<T> = std::result::Result<T, ValidateError>;
