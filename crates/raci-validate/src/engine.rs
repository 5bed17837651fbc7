//! The rule engine.
//!
//! A pure function of the roster, an assignment snapshot, and the rule
//! policy. Per-activity rules run in a fixed order with no
//! short-circuiting, so one activity can generate several issues; the
//! role-overload rule runs once afterwards over the whole workshop.
//!
//! The engine never mutates or persists anything. Re-running it without
//! clearing previously stored issues duplicates them; that bookkeeping
//! belongs to the caller.

use std::collections::BTreeMap;

use tracing::debug;

use raci_model::{
    ActivityId, AssignmentSource, Issue, IssueType, RaciValue, RoleId, Severity,
    ValidationSummary, WorkshopRoster,
};

use crate::error::{Result, SnapshotRecord, ValidateError};
use crate::policy::RulePolicy;

/// Result of one validation run: issues in rule order plus counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRun {
    pub issues: Vec<Issue>,
    pub summary: ValidationSummary,
}

/// Running R/A load per role, with the last activity observed for that
/// role kept as the anchor for any overload issue.
#[derive(Debug, Clone, Copy)]
struct RoleLoad {
    count: u32,
    last_activity: ActivityId,
}

pub fn validate_workshop(
    roster: &WorkshopRoster,
    store: &impl AssignmentSource,
    policy: &RulePolicy,
) -> Result<ValidationRun> {
    let mut issues = Vec::new();
    let mut load: BTreeMap<RoleId, RoleLoad> = BTreeMap::new();

    for activity in &roster.activities {
        let assignments = store.assignments_for(activity.id);
        check_roles(roster, activity.id, &assignments, SnapshotRecord::Assignment)?;
        let recommended = store.recommended_for(activity.id);
        check_roles(roster, activity.id, &recommended, SnapshotRecord::Recommended)?;

        let mut counts: BTreeMap<RaciValue, u32> = BTreeMap::new();
        for (_, value) in &assignments {
            *counts.entry(*value).or_insert(0) += 1;
        }
        let count = |value: RaciValue| counts.get(&value).copied().unwrap_or(0);

        if count(RaciValue::Accountable) == 0 {
            issues.push(Issue {
                workshop: roster.workshop,
                activity: activity.id,
                role: None,
                issue_type: IssueType::MissingAccountable,
                severity: Severity::High,
                description: "Accountable role not selected".to_string(),
                recommendation: Some(
                    "Choose exactly one Accountable for this activity.".to_string(),
                ),
            });
        }
        if count(RaciValue::Accountable) > 1 {
            issues.push(Issue {
                workshop: roster.workshop,
                activity: activity.id,
                role: None,
                issue_type: IssueType::MultipleAccountable,
                severity: Severity::High,
                description: "Multiple Accountable roles detected".to_string(),
                recommendation: Some(
                    "Confirm a single Accountable and move others to R/C/I.".to_string(),
                ),
            });
        }
        if count(RaciValue::Responsible) == 0 {
            issues.push(Issue {
                workshop: roster.workshop,
                activity: activity.id,
                role: None,
                issue_type: IssueType::MissingResponsible,
                severity: policy.missing_responsible_severity,
                description: "Responsible role missing".to_string(),
                recommendation: Some(
                    "Assign at least one Responsible role to do the work.".to_string(),
                ),
            });
        }
        if count(RaciValue::Responsible) > 0 && count(RaciValue::Informed) == 0 {
            issues.push(Issue {
                workshop: roster.workshop,
                activity: activity.id,
                role: None,
                issue_type: IssueType::CommunicationGap,
                severity: Severity::Medium,
                description: "Responsibilities defined without Inform recipients".to_string(),
                recommendation: Some(
                    "Identify who must be Informed when work is performed.".to_string(),
                ),
            });
        }

        let actual: BTreeMap<RoleId, RaciValue> = assignments.iter().copied().collect();
        for (role, expected) in &recommended {
            if actual.get(role) != Some(expected) {
                let found = actual
                    .get(role)
                    .map(|value| value.as_str())
                    .unwrap_or("none");
                issues.push(Issue {
                    workshop: roster.workshop,
                    activity: activity.id,
                    role: Some(*role),
                    issue_type: IssueType::DeviationFromRecommended,
                    severity: Severity::Low,
                    description: format!(
                        "Deviates from recommended baseline: expected {expected}, current value is {found}"
                    ),
                    recommendation: Some(
                        "Align with the recommended baseline or record why this deviates."
                            .to_string(),
                    ),
                });
            }
        }

        for (role, value) in &assignments {
            if matches!(value, RaciValue::Responsible | RaciValue::Accountable) {
                let entry = load.entry(*role).or_insert(RoleLoad {
                    count: 0,
                    last_activity: activity.id,
                });
                entry.count += 1;
                entry.last_activity = activity.id;
            }
        }
    }

    for (role, role_load) in &load {
        if role_load.count > policy.overload_threshold {
            issues.push(Issue {
                workshop: roster.workshop,
                activity: role_load.last_activity,
                role: Some(*role),
                issue_type: IssueType::RoleOverload,
                severity: Severity::Medium,
                description: format!(
                    "Role overload: {} holds {} R/A assignments",
                    roster.role_name(*role),
                    role_load.count
                ),
                recommendation: Some("Redistribute A/R load to reduce bottlenecks.".to_string()),
            });
        }
    }

    let mut summary = ValidationSummary::default();
    for issue in &issues {
        summary.record(issue);
    }
    debug!(
        workshop = %roster.workshop,
        activities = roster.activities.len(),
        issues = issues.len(),
        "validation run complete"
    );
    Ok(ValidationRun { issues, summary })
}

fn check_roles(
    roster: &WorkshopRoster,
    activity: ActivityId,
    rows: &[(RoleId, RaciValue)],
    record: SnapshotRecord,
) -> Result<()> {
    for (role, _) in rows {
        if !roster.contains_role(*role) {
            return Err(ValidateError::IntegrityFault {
                record,
                activity,
                role: *role,
            });
        }
    }
    Ok(())
}
