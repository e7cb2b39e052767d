//! Scenario tests for the validation engine.

mod helpers;

use n8n_mcp_core::{validate_workflow, Strictness, ValidationOptions, ValidatorKind, Workflow};
use serde_json::json;

#[test]
fn test_low_strictness_keeps_only_always_on_checks() {
    let workflow = Workflow::from_value(&helpers::messy_workflow());
    let options = ValidationOptions {
        strictness: Strictness::Low,
        ..ValidationOptions::default()
    };

    let report = validate_workflow(&workflow, &options);

    assert_eq!(
        report.results[&ValidatorKind::Naming].issues,
        vec!["Found 1 duplicate node names"]
    );
    assert!(report.results[&ValidatorKind::ErrorHandling].passed);
    assert!(report.results[&ValidatorKind::Security].passed);
    assert!(report.results[&ValidatorKind::Performance].passed);
    assert_eq!(
        report.results[&ValidatorKind::Documentation].issues,
        vec!["No tags defined for the workflow"]
    );
    assert_eq!(report.total_issues, 2);
    assert_eq!(report.strictness, Strictness::Low);
}

#[test]
fn test_medium_strictness_reports_every_category() {
    let workflow = Workflow::from_value(&helpers::messy_workflow());
    let report = validate_workflow(&workflow, &ValidationOptions::default());

    assert_eq!(
        report.results[&ValidatorKind::Naming].issues,
        vec![
            "Workflow name is too short",
            "2 nodes have default names",
            "Found 1 duplicate node names"
        ]
    );
    assert_eq!(
        report.results[&ValidatorKind::Security].issues,
        vec!["1 nodes potentially contain hard-coded credentials"]
    );
    assert_eq!(
        report.results[&ValidatorKind::Performance].issues,
        vec!["Workflow has 53 nodes, which may impact performance"]
    );
    assert_eq!(
        report.results[&ValidatorKind::Documentation].issues,
        vec![
            "Workflow description is missing",
            "No sticky notes found in a complex workflow",
            "No tags defined for the workflow"
        ]
    );
    assert_eq!(report.total_issues, 9);
    assert!(!report.passed);
}

#[test]
fn test_medium_and_high_behave_identically() {
    let workflow = Workflow::from_value(&helpers::messy_workflow());
    let medium = validate_workflow(&workflow, &ValidationOptions::default());
    let high = validate_workflow(
        &workflow,
        &ValidationOptions {
            strictness: Strictness::High,
            ..ValidationOptions::default()
        },
    );
    assert_eq!(medium.results, high.results);
    assert_eq!(medium.total_issues, high.total_issues);
}

#[test]
fn test_report_invariants_hold_for_varied_documents() {
    let documents = vec![
        json!({}),
        json!({"name": "Ok name", "tags": ["x"], "description": "d",
               "nodes": [{"type": "n8n-nodes-base.errorTrigger"}]}),
        json!({"nodes": "garbage", "tags": {"a": 1}, "connections": 5}),
        helpers::messy_workflow(),
    ];

    for doc in documents {
        let workflow = Workflow::from_value(&doc);
        for strictness in [Strictness::Low, Strictness::Medium, Strictness::High] {
            let options = ValidationOptions {
                strictness,
                ..ValidationOptions::default()
            };
            let report = validate_workflow(&workflow, &options);
            let sum: usize = report.results.values().map(|r| r.issues.len()).sum();
            assert_eq!(report.total_issues, sum);
            assert_eq!(report.passed, report.total_issues == 0);
            for result in report.results.values() {
                assert_eq!(result.passed, result.issues.is_empty());
                assert_eq!(result.issues.len(), result.suggestions.len());
            }
        }
    }
}

#[test]
fn test_clean_workflow_passes() {
    let mut nodes = helpers::plain_nodes(12);
    nodes.push(json!({
        "name": "Overview",
        "type": "n8n-nodes-base.stickyNote",
        "parameters": {"content": "Handles email automation"}
    }));
    let doc = json!({
        "id": "clean",
        "name": "Daily email triage",
        "description": "Sorts the inbox every morning",
        "tags": [{"name": "email"}],
        "settings": {"errorWorkflow": "alerts"},
        "nodes": nodes
    });

    let report = validate_workflow(&Workflow::from_value(&doc), &ValidationOptions::default());
    assert!(report.passed, "unexpected issues: {:?}", report.results);
}

#[test]
fn test_sticky_note_satisfies_documentation_in_large_workflow() {
    let mut nodes = helpers::plain_nodes(12);
    nodes.push(json!({
        "name": "About",
        "type": "n8n-nodes-base.stickyNote",
        "parameters": {"content": "Handles email automation"}
    }));
    let doc = json!({"name": "Email flow", "description": "d", "tags": ["mail"], "nodes": nodes});

    let options = ValidationOptions::from_names(Strictness::High, ["documentation"]);
    let report = validate_workflow(&Workflow::from_value(&doc), &options);
    let documentation = &report.results[&ValidatorKind::Documentation];
    assert!(documentation.passed);
    assert!(!documentation
        .issues
        .iter()
        .any(|i| i.contains("sticky notes")));
}

#[test]
fn test_unknown_validators_are_ignored() {
    let options = ValidationOptions::from_names(Strictness::Medium, ["spelling", "performance"]);
    let report = validate_workflow(&Workflow::default(), &options);
    assert_eq!(
        report.results.keys().copied().collect::<Vec<_>>(),
        vec![ValidatorKind::Performance]
    );
}
