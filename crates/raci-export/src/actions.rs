//! Follow-up actions derived from validation issues, and their CSV
//! rendering for circulation outside the tool.

use raci_model::{Action, ActionStatus, Issue};

use crate::ExportError;

/// One planned action per issue, summarizing what needs resolving.
pub fn actions_from_issues(issues: &[Issue]) -> Vec<Action> {
    issues
        .iter()
        .map(|issue| Action {
            workshop: issue.workshop,
            summary: format!(
                "Resolve {} for activity {}",
                issue.issue_type, issue.activity
            ),
            issue_type: issue.issue_type,
            severity: issue.severity,
            status: ActionStatus::Planned,
            activity: issue.activity,
        })
        .collect()
}

/// Renders the action list as CSV bytes.
pub fn write_actions_csv(actions: &[Action]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Action", "Issue", "Severity", "Status", "Activity"])
        .map_err(|error| ExportError::Csv(error.to_string()))?;
    for action in actions {
        writer
            .write_record([
                action.summary.as_str(),
                action.issue_type.code(),
                action.severity.as_str(),
                action.status.as_str(),
                action.activity.to_string().as_str(),
            ])
            .map_err(|error| ExportError::Csv(error.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|error| ExportError::Csv(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use raci_model::{ActivityId, IssueType, Severity, WorkshopId};

    #[test]
    fn actions_mirror_issues_one_to_one() {
        let issue = Issue {
            workshop: WorkshopId(3),
            activity: ActivityId(5),
            role: None,
            issue_type: IssueType::MissingAccountable,
            severity: Severity::High,
            description: "Accountable role not selected".to_string(),
            recommendation: None,
        };
        let actions = actions_from_issues(std::slice::from_ref(&issue));
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].status, ActionStatus::Planned);
        assert_eq!(actions[0].summary, "Resolve missing_A for activity 5");

        let bytes = write_actions_csv(&actions).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Action,Issue,Severity,Status,Activity"));
        assert!(text.contains("missing_A,high,planned,5"));
    }
}
