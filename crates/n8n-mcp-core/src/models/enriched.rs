//! Enriched catalog records derived from raw workflow files.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Size tier of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Display for Complexity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Complexity::Simple => write!(f, "simple"),
            Complexity::Moderate => write!(f, "moderate"),
            Complexity::Complex => write!(f, "complex"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub node_count: usize,
    pub connection_count: usize,
    pub unique_node_types: usize,
    pub complexity: Complexity,
}

/// A raw workflow plus the fields derived from it. Written once per source
/// file; reprocessing replaces the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedWorkflow {
    pub id: String,
    pub original_filename: String,
    pub category: String,
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub complexity: ComplexityMetrics,
    pub original_workflow: serde_json::Value,
}

/// A catalog entry with its similarity to a search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarWorkflow {
    pub score: f32,
    pub workflow: EnrichedWorkflow,
}
