//! Workflow model extraction
//!
//! Derives the catalog fields of an [`EnrichedWorkflow`] (category, name,
//! description, tags, complexity) from a raw document and its source filename.
//! All functions are deterministic; the only input that varies between runs is
//! the file timestamp used for synthesized identifiers.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::constants::{
    COMPLEX_CONNECTION_THRESHOLD, COMPLEX_NODE_THRESHOLD, GENERATED_ID_PREFIX,
    MODERATE_CONNECTION_THRESHOLD, MODERATE_NODE_THRESHOLD, SERVICE_TAGS, UNCATEGORIZED,
};
use crate::models::{Complexity, ComplexityMetrics, EnrichedWorkflow, Workflow};

const JSON_SUFFIX: &str = ".json";

/// Category is the part of the filename before the first `:`.
pub fn extract_category(filename: &str) -> String {
    let mut parts = filename.split(':');
    match (parts.next(), parts.next()) {
        (Some(category), Some(_)) => category.trim().to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}

/// Name is the part after the first `:` (or the whole filename), without `.json`.
pub fn extract_name(filename: &str) -> String {
    let name = filename.split(':').nth(1).unwrap_or(filename);
    name.strip_suffix(JSON_SUFFIX).unwrap_or(name).to_string()
}

/// Plain-text summary of a workflow used for display and embeddings.
pub fn generate_description(workflow: &Workflow) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(name) = &workflow.name {
        lines.push(format!("Workflow Name: {}\n", name));
    }

    // Node types in order of first appearance
    let mut type_counts: Vec<(&str, usize)> = Vec::new();
    for node_type in workflow.nodes.iter().filter_map(|n| n.canonical_type()) {
        match type_counts.iter_mut().find(|(t, _)| *t == node_type) {
            Some((_, count)) => *count += 1,
            None => type_counts.push((node_type, 1)),
        }
    }
    if !type_counts.is_empty() {
        lines.push("Node Types:".to_string());
        lines.extend(
            type_counts
                .iter()
                .map(|(node_type, count)| format!("- {}: {}", node_type, count)),
        );
    }

    let node_names: BTreeSet<&str> = workflow.node_names().collect();
    if !node_names.is_empty() {
        lines.push("\nNode Names:".to_string());
        lines.extend(node_names.iter().map(|name| format!("- {}", name)));
    }

    let mut sticky_notes = workflow.nodes.iter().filter(|n| n.is_sticky_note()).peekable();
    if sticky_notes.peek().is_some() {
        lines.push("\nWorkflow Documentation:".to_string());
        lines.extend(
            sticky_notes
                .filter_map(|note| note.note_content())
                .map(str::to_string),
        );
    }

    lines.join("\n")
}

/// Declared tags, node type base names and known service names, sorted and deduplicated.
pub fn extract_tags(workflow: &Workflow) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = workflow
        .tags
        .iter()
        .filter_map(|tag| tag.label())
        .map(str::to_string)
        .collect();

    for node_type in workflow.nodes.iter().filter_map(|n| n.canonical_type()) {
        if let Some(base) = node_type.rsplit('.').next().filter(|b| !b.is_empty()) {
            tags.insert(base.to_string());
        }
        tags.extend(
            SERVICE_TAGS
                .iter()
                .filter(|service| node_type.contains(*service))
                .map(|service| service.to_string()),
        );
    }

    tags
}

pub fn analyze_complexity(workflow: &Workflow) -> ComplexityMetrics {
    let node_count = workflow.nodes.len();
    let unique_node_types = workflow
        .nodes
        .iter()
        .filter_map(|n| n.canonical_type())
        .collect::<BTreeSet<_>>()
        .len();
    let connection_count = workflow
        .connections
        .values()
        .flatten()
        .map(Vec::len)
        .sum();

    ComplexityMetrics {
        node_count,
        connection_count,
        unique_node_types,
        complexity: complexity_tier(node_count, connection_count),
    }
}

/// Complex is checked first, so overlapping thresholds resolve to complex.
pub fn complexity_tier(node_count: usize, connection_count: usize) -> Complexity {
    if node_count > COMPLEX_NODE_THRESHOLD || connection_count > COMPLEX_CONNECTION_THRESHOLD {
        Complexity::Complex
    } else if node_count > MODERATE_NODE_THRESHOLD
        || connection_count > MODERATE_CONNECTION_THRESHOLD
    {
        Complexity::Moderate
    } else {
        Complexity::Simple
    }
}

/// Identifier used when the document carries no `id`.
pub fn generated_id(created_at_secs: i64) -> String {
    format!("{}{}", GENERATED_ID_PREFIX, created_at_secs)
}

/// Build the catalog record for one raw document.
///
/// `created_at_secs` is the source file's creation time and is only used when
/// the document has no `id`.
pub fn enrich_workflow(raw: Value, filename: &str, created_at_secs: i64) -> EnrichedWorkflow {
    let workflow = Workflow::from_value(&raw);

    EnrichedWorkflow {
        id: workflow
            .id
            .clone()
            .unwrap_or_else(|| generated_id(created_at_secs)),
        original_filename: filename.to_string(),
        category: extract_category(filename),
        name: extract_name(filename),
        description: generate_description(&workflow),
        tags: extract_tags(&workflow),
        complexity: analyze_complexity(&workflow),
        original_workflow: raw,
    }
}
