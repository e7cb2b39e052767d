//! Text embedding provider abstraction and the Ollama-compatible HTTP client.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use n8n_mcp_core::EmbeddingConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Required embedding dimension for the `vector(384)` column.
pub const EMBEDDING_DIM: usize = 384;

/// Turns text into embedding vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Model name sent with every request (e.g. "qwen3-embedding-0.6b").
    fn model_name(&self) -> &str;

    /// Embed `text`. Transport failures and non-2xx responses are errors.
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>>;

    /// Like [`generate_embedding`](Self::generate_embedding), but logs the
    /// failure and returns `None`.
    async fn try_embed(&self, text: &str) -> Option<Vec<f32>> {
        match self.generate_embedding(text).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                tracing::error!(model = %self.model_name(), error = %e, "Error getting embedding");
                None
            }
        }
    }
}

/// Normalize embedding to [EMBEDDING_DIM] (truncate or zero-pad).
pub fn normalize_embedding_dim(mut vec: Vec<f32>) -> Vec<f32> {
    if vec.len() > EMBEDDING_DIM {
        vec.truncate(EMBEDDING_DIM);
    } else if vec.len() < EMBEDDING_DIM {
        vec.resize(EMBEDDING_DIM, 0.0);
    }
    vec
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Client for `POST {host}/api/embeddings`.
#[derive(Clone, Debug)]
pub struct OllamaEmbeddingClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaEmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/embeddings", config.host.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbeddingRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .await
            .context("Failed to send embedding request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Embedding request failed with status {}: {}",
                status,
                error_text
            ));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse embedding response")?;

        Ok(body.embedding)
    }
}
