//! In-memory vectorization and similarity search over enriched workflows.

use std::sync::Arc;

use n8n_mcp_core::{rank, EnrichedWorkflow, SimilarWorkflow};

use super::embedding::EmbeddingProvider;

#[derive(Clone)]
pub struct SemanticSearchService {
    provider: Arc<dyn EmbeddingProvider>,
}

impl SemanticSearchService {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    /// Embed the description of every workflow.
    ///
    /// Returns `(index, embedding)` pairs; workflows whose embedding failed
    /// are left out.
    pub async fn vectorize(&self, workflows: &[EnrichedWorkflow]) -> Vec<(usize, Vec<f32>)> {
        let mut embedded = Vec::with_capacity(workflows.len());
        for (index, workflow) in workflows.iter().enumerate() {
            if let Some(embedding) = self.provider.try_embed(&workflow.description).await {
                embedded.push((index, embedding));
            }
        }
        tracing::info!(
            embedded = embedded.len(),
            total = workflows.len(),
            "Generated workflow embeddings"
        );
        embedded
    }

    /// The `top_k` workflows most similar to `query`, best first.
    ///
    /// Empty when the query itself cannot be embedded.
    pub async fn search(
        &self,
        query: &str,
        workflows: &[EnrichedWorkflow],
        top_k: usize,
    ) -> Vec<SimilarWorkflow> {
        let embedded = self.vectorize(workflows).await;

        let Some(query_embedding) = self.provider.try_embed(query).await else {
            return Vec::new();
        };

        let vectors: Vec<&[f32]> = embedded.iter().map(|(_, v)| v.as_slice()).collect();
        rank(&query_embedding, &vectors, top_k)
            .into_iter()
            .map(|(position, score)| SimilarWorkflow {
                score,
                workflow: workflows[embedded[position].0].clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use n8n_mcp_core::enrich_workflow;
    use serde_json::json;

    /// Maps known texts to fixed vectors; anything else fails.
    struct FakeProvider;

    #[async_trait]
    impl EmbeddingProvider for FakeProvider {
        fn model_name(&self) -> &str {
            "fake"
        }

        async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
            if text.contains("gmail") || text.contains("email") {
                Ok(vec![1.0, 0.0])
            } else if text.contains("slack") {
                Ok(vec![0.0, 1.0])
            } else if text.contains("mixed") {
                Ok(vec![0.7, 0.7])
            } else {
                Err(anyhow::anyhow!("cannot embed"))
            }
        }
    }

    fn workflow(id: &str, node_type: &str) -> EnrichedWorkflow {
        enrich_workflow(
            json!({"id": id, "nodes": [{"name": id, "type": node_type}]}),
            &format!("{id}.json"),
            0,
        )
    }

    fn service() -> SemanticSearchService {
        SemanticSearchService::new(Arc::new(FakeProvider))
    }

    #[tokio::test]
    async fn search_ranks_by_similarity() {
        let workflows = vec![
            workflow("chat", "n8n-nodes-base.slack"),
            workflow("both", "custom.mixed"),
            workflow("mail", "n8n-nodes-base.gmail"),
        ];

        let results = service().search("email automation", &workflows, 2).await;

        let ids: Vec<&str> = results.iter().map(|r| r.workflow.id.as_str()).collect();
        assert_eq!(ids, vec!["mail", "both"]);
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn failed_embeddings_do_not_shift_results() {
        let workflows = vec![
            workflow("unknown", "custom.thing"),
            workflow("mail", "n8n-nodes-base.gmail"),
        ];

        let embedded = service().vectorize(&workflows).await;
        assert_eq!(embedded.len(), 1);
        assert_eq!(embedded[0].0, 1);

        let results = service().search("email", &workflows, 5).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].workflow.id, "mail");
    }

    #[tokio::test]
    async fn unembeddable_query_returns_nothing() {
        let workflows = vec![workflow("mail", "n8n-nodes-base.gmail")];
        assert!(service().search("???", &workflows, 5).await.is_empty());
    }
}
