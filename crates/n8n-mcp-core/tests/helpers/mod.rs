//! Workflow document builders shared by the scenario tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// `count` plain nodes with unique, non-default names.
pub fn plain_nodes(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({"name": format!("Step {}", i), "type": "n8n-nodes-base.noOp"}))
        .collect()
}

/// A connections map with `count` links spread over one source node.
pub fn connections(count: usize) -> Value {
    let targets: Vec<Value> = (0..count).map(|i| json!({"node": format!("Step {}", i)})).collect();
    json!({"Step 0": {"main": [targets]}})
}

/// A document that triggers every gated rule at medium strictness.
pub fn messy_workflow() -> Value {
    let mut nodes = vec![
        json!({"name": "gmail", "type": "n8n-nodes-base.gmail"}),
        json!({"name": "gmail", "type": "n8n-nodes-base.gmail"}),
        json!({"name": "httpRequest", "type": "n8n-nodes-base.httpRequest",
               "parameters": {"headers": {"X-Api-Key": "abc123"}}}),
    ];
    nodes.extend(plain_nodes(50));

    json!({
        "name": "WF",
        "nodes": nodes,
        "connections": connections(3)
    })
}
