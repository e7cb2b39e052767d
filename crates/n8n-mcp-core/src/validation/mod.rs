//! Rule-based workflow validation engine
//!
//! [`validate_workflow`] runs the selected rule categories in declaration order
//! and aggregates their findings into a [`ValidationReport`]. Findings are data,
//! never errors: validation always succeeds.

pub mod rules;

use std::collections::BTreeMap;

pub use crate::models::{Strictness, ValidationOptions, ValidatorKind};
use crate::models::{ValidationReport, Workflow, WorkflowRef};

pub fn validate_workflow(workflow: &Workflow, options: &ValidationOptions) -> ValidationReport {
    let results: BTreeMap<ValidatorKind, _> = options
        .validators
        .iter()
        .map(|&kind| (kind, rules::run(kind, workflow, options.strictness)))
        .collect();

    let total_issues = results.values().map(|r| r.issues.len()).sum();

    ValidationReport {
        workflow: WorkflowRef {
            id: workflow.id.clone(),
            name: workflow.name.clone(),
        },
        passed: total_issues == 0,
        total_issues,
        strictness: options.strictness,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_aggregates_selected_categories() {
        let workflow = Workflow::from_value(&json!({"id": "7", "nodes": []}));
        let options = ValidationOptions::from_names(Strictness::Medium, ["documentation", "naming"]);

        let report = validate_workflow(&workflow, &options);
        assert_eq!(report.workflow.id.as_deref(), Some("7"));
        assert_eq!(report.workflow.name, None);
        assert_eq!(
            report.results.keys().copied().collect::<Vec<_>>(),
            vec![ValidatorKind::Naming, ValidatorKind::Documentation]
        );
        // name missing + description missing + no tags
        assert_eq!(report.total_issues, 3);
        assert!(!report.passed);
    }

    #[test]
    fn empty_selection_passes() {
        let workflow = Workflow::default();
        let options = ValidationOptions::from_names(Strictness::High, ["unknown"]);
        let report = validate_workflow(&workflow, &options);
        assert!(report.results.is_empty());
        assert_eq!(report.total_issues, 0);
        assert!(report.passed);
    }

    #[test]
    fn report_serializes_with_wire_names() {
        let workflow = Workflow::from_value(&json!({
            "id": "wf", "name": "Nightly backup", "description": "Backs up",
            "tags": ["ops"], "settings": {"errorWorkflow": "err"}
        }));
        let report = validate_workflow(&workflow, &ValidationOptions::default());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["passed"], json!(true));
        assert_eq!(value["totalIssues"], json!(0));
        assert_eq!(value["strictness"], json!("medium"));
        assert_eq!(value["workflow"], json!({"id": "wf", "name": "Nightly backup"}));
        assert_eq!(value["results"]["errorHandling"]["category"], json!("errorHandling"));
        assert_eq!(value["results"]["documentation"]["passed"], json!(true));
    }
}
