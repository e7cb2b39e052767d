//! HTTP client for the n8n public REST API.
//!
//! [`N8nApiClient`] carries the base URL and the static `X-N8N-API-KEY`
//! credential and provides generic GET/POST/PUT helpers. The workflow
//! operations in [`api`] turn every transport failure into a logged sentinel
//! (`None` or a possibly partial list) instead of an error.

pub mod api;

use std::time::Duration;

use anyhow::{Context, Result};
use n8n_mcp_core::{AppError, N8nConfig};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

pub use api::{collect_pages, WorkflowPage};

const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// HTTP client for the n8n API.
#[derive(Clone, Debug)]
pub struct N8nApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_prefix: String,
}

impl N8nApiClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        api_version: &str,
        timeout_seconds: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_prefix: format!("/api/{}", api_version),
        })
    }

    /// Build the client from configuration. A missing API key is fatal.
    pub fn from_config(config: &N8nConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::Configuration("N8N_API_KEY not found in environment".to_string())
        })?;

        Self::new(
            &config.host,
            api_key,
            &config.api_version,
            config.timeout_seconds,
        )
        .map_err(|e| AppError::InternalWithSource {
            message: "Failed to create n8n API client".to_string(),
            source: e,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an API path such as `/workflows`.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header("Accept", "application/json")
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let mut request = self.apply_auth(self.client.get(self.build_url(path)));
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(send_error)?;
        decode(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.apply_auth(self.client.post(self.build_url(path)).json(body));
        let response = request.send().await.map_err(send_error)?;
        decode(response).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.apply_auth(self.client.put(self.build_url(path)).json(body));
        let response = request.send().await.map_err(send_error)?;
        decode(response).await
    }
}

fn send_error(err: reqwest::Error) -> AppError {
    AppError::Transport(format!("Failed to send request: {}", err))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::Transport(format!(
            "API request failed with status {}: {}",
            status, error_text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Transport(format!("Failed to parse response as JSON: {}", e)))
}
