use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid RACI value: {0:?}")]
    InvalidRaciValue(String),

    #[error("invalid severity: {0:?}")]
    InvalidSeverity(String),

    #[error("invalid issue type: {0:?}")]
    InvalidIssueType(String),

    #[error("invalid role key: {0:?}")]
    InvalidRoleKey(String),
}
