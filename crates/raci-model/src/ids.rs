use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ModelError;

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifies one workshop in the external store.
    WorkshopId
);
numeric_id!(
    /// Identifies one domain (matrix sheet) in the external store.
    DomainId
);
numeric_id!(
    /// Identifies one activity in the external store.
    ActivityId
);
numeric_id!(
    /// Identifies one role in the external store.
    RoleId
);

/// Domain-scoped role identity: `"<sheet name>:<role name>"`.
///
/// The sheet prefix keeps the same person or title in two domains from
/// colliding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleKey(String);

impl RoleKey {
    pub fn new(sheet_name: &str, role_name: &str) -> Self {
        Self(format!("{sheet_name}:{role_name}"))
    }

    /// Wraps an already-formed key, e.g. one read back from the store.
    pub fn parse(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.contains(':') {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidRoleKey(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
