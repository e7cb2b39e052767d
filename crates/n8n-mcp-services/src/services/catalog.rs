//! On-disk workflow catalog.
//!
//! Reads raw `{category}:{name}.json` files from the workflows directory,
//! enriches them and writes one `{id}.json` per workflow plus
//! [`SUMMARY_FILE`] to the output directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use n8n_mcp_core::models::original_document;
use n8n_mcp_core::{enrich_workflow, AppError, CatalogConfig, EnrichedWorkflow};
use serde_json::Value;

/// Aggregate array of every enriched workflow of a run.
pub const SUMMARY_FILE: &str = "workflows-summary.json";

/// Read a workflow JSON file for validation or import.
///
/// Enriched catalog records are unwrapped to the workflow they were built from.
pub async fn read_workflow_file(path: &Path) -> Result<Value, AppError> {
    let content = tokio::fs::read_to_string(path).await?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(original_document(&value).clone())
}

#[derive(Clone, Debug)]
pub struct WorkflowCatalog {
    workflows_dir: PathBuf,
    output_dir: PathBuf,
}

impl WorkflowCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            workflows_dir: config.workflows_dir.clone(),
            output_dir: config.output_dir.clone(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Enrich a single raw workflow file.
    ///
    /// Empty files and documents that are not JSON objects are rejected.
    pub async fn process_file(&self, path: &Path) -> Result<EnrichedWorkflow, AppError> {
        let content = tokio::fs::read_to_string(path).await?;
        if content.is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Empty workflow file: {}",
                path.display()
            )));
        }

        let raw: Value = serde_json::from_str(&content)?;
        if !raw.is_object() {
            return Err(AppError::InvalidInput(format!(
                "Workflow file is not a JSON object: {}",
                path.display()
            )));
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let created_at = file_created_at(path).await?;

        Ok(enrich_workflow(raw, &filename, created_at))
    }

    /// Enrich every `*.json` file of the workflows directory and write the results.
    ///
    /// Files that fail to process are logged and skipped.
    #[tracing::instrument(skip(self), fields(workflows_dir = %self.workflows_dir.display()))]
    pub async fn process_all(&self) -> Result<Vec<EnrichedWorkflow>, AppError> {
        let files = self.workflow_files().await?;
        tracing::info!(count = files.len(), "Found workflow files to process");

        tokio::fs::create_dir_all(&self.output_dir).await?;

        let mut processed = Vec::with_capacity(files.len());
        for path in files {
            match self.process_file(&path).await {
                Ok(workflow) => {
                    match self
                        .write_json(&output_file_name(&workflow.id), &workflow)
                        .await
                    {
                        Ok(()) => processed.push(workflow),
                        Err(e) => {
                            tracing::warn!(
                                path = %path.display(),
                                workflow_id = %workflow.id,
                                error = %e,
                                "Could not write enriched workflow, skipping"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping workflow file");
                }
            }
        }

        self.write_json(SUMMARY_FILE, &processed).await?;
        tracing::info!(
            count = processed.len(),
            output_dir = %self.output_dir.display(),
            "Processed workflows"
        );

        Ok(processed)
    }

    async fn workflow_files(&self) -> Result<Vec<PathBuf>, AppError> {
        let mut entries = tokio::fs::read_dir(&self.workflows_dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") && entry.file_type().await?.is_file()
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    async fn write_json<T: serde::Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(value)?;
        tokio::fs::write(self.output_dir.join(file_name), json).await?;
        Ok(())
    }
}

/// `{id}.json`, with path separators in the id replaced.
fn output_file_name(id: &str) -> String {
    format!("{}.json", id.replace(['/', '\\'], "_"))
}

/// File creation time in Unix seconds, falling back to modification time
/// on filesystems that do not record it.
async fn file_created_at(path: &Path) -> Result<i64, AppError> {
    let metadata = tokio::fs::metadata(path).await?;
    let time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|_| SystemTime::now());
    Ok(DateTime::<Utc>::from(time).timestamp())
}
