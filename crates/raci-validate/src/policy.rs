use serde::{Deserialize, Serialize};

use raci_model::Severity;

/// Tunable parts of the rule set.
///
/// The source material disagrees with itself on how hard to treat a
/// missing Responsible (high in one rule set, medium in another), so the
/// severity is a runtime choice pending a product decision, never a
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePolicy {
    pub missing_responsible_severity: Severity,
    /// A role whose combined R/A assignment count exceeds this emits a
    /// role-overload issue.
    pub overload_threshold: u32,
}

impl RulePolicy {
    pub const DEFAULT_OVERLOAD_THRESHOLD: u32 = 10;

    /// Missing Responsible is as severe as missing Accountable.
    pub fn strict() -> Self {
        Self {
            missing_responsible_severity: Severity::High,
            overload_threshold: Self::DEFAULT_OVERLOAD_THRESHOLD,
        }
    }

    /// Missing Responsible is a medium finding.
    pub fn lenient() -> Self {
        Self {
            missing_responsible_severity: Severity::Medium,
            overload_threshold: Self::DEFAULT_OVERLOAD_THRESHOLD,
        }
    }

    pub fn with_overload_threshold(mut self, threshold: u32) -> Self {
        self.overload_threshold = threshold;
        self
    }
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self::strict()
    }
}
