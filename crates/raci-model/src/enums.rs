//! Closed enumerations for RACI concepts.
//!
//! Template cells and external snapshots carry free-form strings; these
//! enums validate them once at the boundary so the rest of the core
//! never re-checks string contents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// The four assignment values a role may hold for an activity.
///
/// "No assignment" is modeled as the absence of a value
/// (`Option<RaciValue>`), never as a fifth variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RaciValue {
    /// Responsible: does the work.
    #[serde(rename = "R")]
    Responsible,
    /// Accountable: owns the outcome; exactly one per activity.
    #[serde(rename = "A")]
    Accountable,
    /// Consulted: provides input before the work is done.
    #[serde(rename = "C")]
    Consulted,
    /// Informed: told after the work is done.
    #[serde(rename = "I")]
    Informed,
}

impl RaciValue {
    /// Single-letter code as written in matrix cells.
    pub fn as_str(&self) -> &'static str {
        match self {
            RaciValue::Responsible => "R",
            RaciValue::Accountable => "A",
            RaciValue::Consulted => "C",
            RaciValue::Informed => "I",
        }
    }
}

impl fmt::Display for RaciValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RaciValue {
    type Err = ModelError;

    /// Accepts the single-letter codes and the full words, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "R" | "RESPONSIBLE" => Ok(RaciValue::Responsible),
            "A" | "ACCOUNTABLE" => Ok(RaciValue::Accountable),
            "C" | "CONSULTED" => Ok(RaciValue::Consulted),
            "I" | "INFORMED" => Ok(RaciValue::Informed),
            _ => Err(ModelError::InvalidRaciValue(s.to_string())),
        }
    }
}

/// Issue severity. Ordering puts `High` first so severity-keyed maps and
/// sorted issue lists lead with the most urgent entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            _ => Err(ModelError::InvalidSeverity(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raci_value_parses_letters_and_words() {
        assert_eq!(" r ".parse::<RaciValue>().unwrap(), RaciValue::Responsible);
        assert_eq!(
            "Accountable".parse::<RaciValue>().unwrap(),
            RaciValue::Accountable
        );
        assert!("X".parse::<RaciValue>().is_err());
        assert!("".parse::<RaciValue>().is_err());
    }

    #[test]
    fn severity_orders_high_first() {
        assert!(Severity::High < Severity::Medium);
        assert!(Severity::Medium < Severity::Low);
    }
}
