//! Validation issues and follow-up actions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{ActivityId, ModelError, RoleId, Severity, WorkshopId};

/// Structural problems the rule engine can flag. Declaration order is
/// the rule evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IssueType {
    #[serde(rename = "missing_A")]
    MissingAccountable,
    #[serde(rename = "multiple_A")]
    MultipleAccountable,
    #[serde(rename = "missing_R")]
    MissingResponsible,
    #[serde(rename = "communication_gap")]
    CommunicationGap,
    #[serde(rename = "deviation_from_recommended")]
    DeviationFromRecommended,
    #[serde(rename = "role_overload")]
    RoleOverload,
}

impl IssueType {
    /// Stable code used in exports and by the external store.
    pub fn code(&self) -> &'static str {
        match self {
            IssueType::MissingAccountable => "missing_A",
            IssueType::MultipleAccountable => "multiple_A",
            IssueType::MissingResponsible => "missing_R",
            IssueType::CommunicationGap => "communication_gap",
            IssueType::DeviationFromRecommended => "deviation_from_recommended",
            IssueType::RoleOverload => "role_overload",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for IssueType {
    type Err = ModelError;

    /// Accepts the stable codes plus the aliases seen in older exports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "missing_A" => Ok(IssueType::MissingAccountable),
            "multiple_A" | "too_many_A" => Ok(IssueType::MultipleAccountable),
            "missing_R" | "no_R" => Ok(IssueType::MissingResponsible),
            "communication_gap" => Ok(IssueType::CommunicationGap),
            "deviation_from_recommended" => Ok(IssueType::DeviationFromRecommended),
            "role_overload" => Ok(IssueType::RoleOverload),
            _ => Err(ModelError::InvalidIssueType(s.to_string())),
        }
    }
}

/// One structural problem detected for an activity (and optionally a
/// role). Created fresh on every validation run; identity and clearing
/// belong to the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub workshop: WorkshopId,
    pub activity: ActivityId,
    pub role: Option<RoleId>,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub description: String,
    pub recommendation: Option<String>,
}

/// Counts for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub issues_created: usize,
    pub by_type: BTreeMap<IssueType, usize>,
    pub by_severity: BTreeMap<Severity, usize>,
}

impl ValidationSummary {
    pub fn record(&mut self, issue: &Issue) {
        self.issues_created += 1;
        *self.by_type.entry(issue.issue_type).or_insert(0) += 1;
        *self.by_severity.entry(issue.severity).or_insert(0) += 1;
    }

    pub fn count_of(&self, issue_type: IssueType) -> usize {
        self.by_type.get(&issue_type).copied().unwrap_or(0)
    }

    pub fn high_severity_count(&self) -> usize {
        self.by_severity.get(&Severity::High).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Planned,
    Open,
    Done,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Planned => "planned",
            ActionStatus::Open => "open",
            ActionStatus::Done => "done",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A follow-up task derived from an [`Issue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub workshop: WorkshopId,
    pub summary: String,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub status: ActionStatus,
    pub activity: ActivityId,
}
