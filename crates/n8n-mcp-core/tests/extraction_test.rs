//! Scenario tests for workflow model extraction and similarity ranking.

mod helpers;

use n8n_mcp_core::extraction::{analyze_complexity, complexity_tier, extract_tags};
use n8n_mcp_core::{enrich_workflow, rank, Complexity, EnrichedWorkflow, Workflow};
use serde_json::json;

#[test]
fn test_complexity_tiers() {
    assert_eq!(complexity_tier(16, 0), Complexity::Complex);
    assert_eq!(complexity_tier(8, 0), Complexity::Moderate);
    assert_eq!(complexity_tier(5, 5), Complexity::Simple);
    assert_eq!(complexity_tier(16, 25), Complexity::Complex);
    assert_eq!(complexity_tier(0, 21), Complexity::Complex);
    assert_eq!(complexity_tier(0, 11), Complexity::Moderate);
    assert_eq!(complexity_tier(7, 10), Complexity::Simple);
}

#[test]
fn test_complexity_from_document() {
    let doc = json!({"nodes": helpers::plain_nodes(16), "connections": helpers::connections(25)});
    let metrics = analyze_complexity(&Workflow::from_value(&doc));
    assert_eq!(metrics.node_count, 16);
    assert_eq!(metrics.connection_count, 25);
    assert_eq!(metrics.unique_node_types, 1);
    assert_eq!(metrics.complexity, Complexity::Complex);
}

#[test]
fn test_tag_extraction_is_deterministic() {
    let doc = json!({
        "tags": ["zeta", "alpha", "zeta"],
        "nodes": [
            {"type": "n8n-nodes-base.webhook"},
            {"type": "n8n-nodes-base.postgres"},
            {"type": "n8n-nodes-base.webhook"}
        ]
    });
    let workflow = Workflow::from_value(&doc);
    let first: Vec<String> = extract_tags(&workflow).into_iter().collect();
    let second: Vec<String> = extract_tags(&workflow).into_iter().collect();

    assert_eq!(first, second);
    assert_eq!(first, vec!["alpha", "postgres", "webhook", "zeta"]);
}

#[test]
fn test_enriched_workflow_round_trip() {
    let doc = json!({
        "id": "rt-1",
        "name": "Lead sync",
        "tags": ["crm"],
        "nodes": [
            {"name": "Hook", "type": "n8n-nodes-base.webhook"},
            {"name": "Store", "type": "n8n-nodes-base.postgres"},
            {"name": "Note", "type": "n8n-nodes-base.stickyNote",
             "parameters": {"content": "Receives leads"}}
        ],
        "connections": {"Hook": {"main": [[{"node": "Store"}]]}}
    });
    let enriched = enrich_workflow(doc, "Sales:Lead sync.json", 0);

    let text = serde_json::to_string(&enriched).unwrap();
    let back: EnrichedWorkflow = serde_json::from_str(&text).unwrap();

    assert_eq!(back.tags, enriched.tags);
    assert_eq!(back.complexity, enriched.complexity);
    assert_eq!(back.description, enriched.description);
    assert_eq!(back, enriched);

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["originalFilename"], json!("Sales:Lead sync.json"));
    assert_eq!(value["complexity"]["nodeCount"], json!(3));
    assert_eq!(value["complexity"]["complexity"], json!("simple"));
}

#[test]
fn test_missing_id_is_synthesized_with_marker() {
    let enriched = enrich_workflow(json!({"name": "No id"}), "No id.json", 1_712_345_678);
    assert!(!enriched.id.is_empty());
    assert!(enriched.id.starts_with("generated-"));

    let genuine = enrich_workflow(json!({"id": "abc"}), "x.json", 1_712_345_678);
    assert!(!genuine.id.starts_with("generated-"));
}

#[test]
fn test_empty_document_does_not_fail() {
    let enriched = enrich_workflow(json!({}), "empty.json", 5);
    assert_eq!(enriched.id, "generated-5");
    assert_eq!(enriched.category, "uncategorized");
    assert_eq!(enriched.description, "");
    assert!(enriched.tags.is_empty());
    assert_eq!(enriched.complexity.complexity, Complexity::Simple);
}

#[test]
fn test_rank_prefers_most_similar_candidate() {
    let query = [1.0_f32, 0.0, 0.0];
    let candidates = vec![
        vec![0.0_f32, 1.0, 0.0],
        vec![0.5, 0.5, 0.0],
        vec![0.9, 0.1, 0.0],
    ];
    let top = rank(&query, &candidates, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0, 2);
}

#[test]
fn test_rank_ties_keep_original_order() {
    let query = [1.0_f32, 1.0];
    let candidates = vec![
        vec![1.0_f32, 1.0],
        vec![0.0, 1.0],
        vec![1.0, 1.0],
        vec![1.0, 1.0],
    ];
    let ranked: Vec<usize> = rank(&query, &candidates, 10).into_iter().map(|(i, _)| i).collect();
    assert_eq!(ranked, vec![0, 2, 3, 1]);
}
