//! Per-category validation rules.
//!
//! Each rule is a pure function of the workflow and the strictness. Checks
//! that are skipped at low strictness emit neither an issue nor a suggestion.

use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{
    CREDENTIAL_KEYWORDS, MAX_NODES_BEFORE_SPLIT, MIN_NODES_FOR_STICKY_NOTES, MIN_WORKFLOW_NAME_LEN,
};
use crate::models::{CategoryResult, Strictness, ValidatorKind, Workflow};

/// Issue and suggestion pairs collected by a rule.
#[derive(Default)]
struct Findings {
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl Findings {
    fn flag(&mut self, issue: impl Into<String>, suggestion: &str) {
        self.issues.push(issue.into());
        self.suggestions.push(suggestion.to_string());
    }

    fn into_result(self, category: ValidatorKind) -> CategoryResult {
        CategoryResult::new(category, self.issues, self.suggestions)
    }
}

/// Run the rule of one category.
pub fn run(kind: ValidatorKind, workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    match kind {
        ValidatorKind::Naming => naming(workflow, strictness),
        ValidatorKind::ErrorHandling => error_handling(workflow, strictness),
        ValidatorKind::Security => security(workflow, strictness),
        ValidatorKind::Performance => performance(workflow, strictness),
        ValidatorKind::Documentation => documentation(workflow, strictness),
    }
}

pub fn naming(workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    let mut findings = Findings::default();

    match &workflow.name {
        None => findings.flag(
            "Workflow name is missing",
            "Add a descriptive name to the workflow",
        ),
        Some(name) if name.chars().count() < MIN_WORKFLOW_NAME_LEN && !strictness.is_low() => {
            findings.flag(
                "Workflow name is too short",
                "Use a more descriptive name that indicates the workflow's purpose",
            )
        }
        Some(_) => {}
    }

    // Distinct names, not nodes: a placeholder name used twice counts once
    let default_names: BTreeSet<&str> = workflow
        .nodes
        .iter()
        .filter_map(|node| {
            let name = node.name.as_deref()?;
            let base = node.type_base_name()?;
            name.contains(base).then_some(name)
        })
        .collect();

    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in workflow.node_names() {
        *name_counts.entry(name).or_default() += 1;
    }
    let duplicate_names = name_counts.values().filter(|&&count| count > 1).count();

    if !default_names.is_empty() && !strictness.is_low() {
        findings.flag(
            format!("{} nodes have default names", default_names.len()),
            "Rename nodes to better describe their purpose in the workflow",
        );
    }

    if duplicate_names > 0 {
        findings.flag(
            format!("Found {} duplicate node names", duplicate_names),
            "Ensure each node has a unique name to avoid confusion",
        );
    }

    findings.into_result(ValidatorKind::Naming)
}

pub fn error_handling(workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    let mut findings = Findings::default();

    let has_error_trigger = workflow.nodes.iter().any(|n| n.is_error_trigger());
    if !has_error_trigger && workflow.error_workflow.is_none() && !strictness.is_low() {
        findings.flag(
            "No error handling found in workflow",
            "Add an Error Trigger node or set an error workflow in the settings",
        );
    }

    findings.into_result(ValidatorKind::ErrorHandling)
}

pub fn security(workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    let mut findings = Findings::default();

    if !strictness.is_low() {
        let flagged = workflow
            .nodes
            .iter()
            .filter_map(|node| node.parameters_text())
            .filter(|text| CREDENTIAL_KEYWORDS.iter().any(|kw| text.contains(kw)))
            .count();

        if flagged > 0 {
            findings.flag(
                format!("{} nodes potentially contain hard-coded credentials", flagged),
                "Use credential objects instead of hard-coding sensitive information",
            );
        }
    }

    findings.into_result(ValidatorKind::Security)
}

pub fn performance(workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    let mut findings = Findings::default();

    let node_count = workflow.nodes.len();
    if node_count > MAX_NODES_BEFORE_SPLIT && !strictness.is_low() {
        findings.flag(
            format!("Workflow has {} nodes, which may impact performance", node_count),
            "Consider breaking down complex workflows into smaller sub-workflows",
        );
    }

    findings.into_result(ValidatorKind::Performance)
}

pub fn documentation(workflow: &Workflow, strictness: Strictness) -> CategoryResult {
    let mut findings = Findings::default();

    if workflow.description.is_none() && !strictness.is_low() {
        findings.flag(
            "Workflow description is missing",
            "Add a detailed description explaining the workflow's purpose and functionality",
        );
    }

    let has_sticky_note = workflow.nodes.iter().any(|n| n.is_sticky_note());
    if !has_sticky_note && workflow.nodes.len() > MIN_NODES_FOR_STICKY_NOTES && !strictness.is_low()
    {
        findings.flag(
            "No sticky notes found in a complex workflow",
            "Add sticky notes to document workflow sections and complex logic",
        );
    }

    // Always active
    if workflow.tags.is_empty() {
        findings.flag(
            "No tags defined for the workflow",
            "Add relevant tags to make the workflow more discoverable",
        );
    }

    findings.into_result(ValidatorKind::Documentation)
}
