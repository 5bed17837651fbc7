#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod policy;

pub use engine::{ValidationRun, validate_workshop};
pub use error::{SnapshotRecord, ValidateError};
pub use policy::RulePolicy;
