//! Workflow operations of the n8n API.
//!
//! Failures are logged and returned as sentinels: `None` for single-record
//! calls and the pages gathered so far for listing.

use std::future::Future;

use n8n_mcp_core::{AppError, ErrorMetadata};
use serde::Deserialize;
use serde_json::Value;

use crate::N8nApiClient;

/// One page of `GET /workflows`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPage {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Accumulate pages until one has no next cursor.
///
/// `fetch` receives the cursor of the page to load (`None` for the first).
/// A failed fetch is logged and ends the walk with what was collected.
pub async fn collect_pages<F, Fut>(mut fetch: F) -> Vec<Value>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<WorkflowPage, AppError>>,
{
    let mut workflows = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        match fetch(cursor.take()).await {
            Ok(page) => {
                workflows.extend(page.data.unwrap_or_default());
                match page.next_cursor.filter(|c| !c.is_empty()) {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }
            Err(e) => {
                tracing::error!(
                    code = e.error_code(),
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Error fetching workflows"
                );
                break;
            }
        }
    }

    workflows
}

fn workflow_path(workflow_id: &str) -> String {
    format!("/workflows/{}", urlencoding::encode(workflow_id))
}

impl N8nApiClient {
    /// All workflows, following pagination.
    pub async fn list_workflows(&self) -> Vec<Value> {
        let workflows = collect_pages(|cursor| async move {
            let query: Vec<(&str, String)> = cursor.map(|c| ("cursor", c)).into_iter().collect();
            self.get::<WorkflowPage>("/workflows", &query).await
        })
        .await;

        tracing::debug!(count = workflows.len(), "Fetched workflows");
        workflows
    }

    pub async fn get_workflow(&self, workflow_id: &str) -> Option<Value> {
        match self.get(&workflow_path(workflow_id), &[]).await {
            Ok(workflow) => Some(workflow),
            Err(e) => {
                tracing::error!(
                    workflow_id = %workflow_id,
                    code = e.error_code(),
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Error fetching workflow"
                );
                None
            }
        }
    }

    pub async fn create_workflow(&self, workflow_data: &Value) -> Option<Value> {
        match self.post_json("/workflows", workflow_data).await {
            Ok(created) => Some(created),
            Err(e) => {
                tracing::error!(
                    code = e.error_code(),
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Error creating workflow"
                );
                None
            }
        }
    }

    pub async fn update_workflow(&self, workflow_id: &str, workflow_data: &Value) -> Option<Value> {
        match self.put_json(&workflow_path(workflow_id), workflow_data).await {
            Ok(updated) => Some(updated),
            Err(e) => {
                tracing::error!(
                    workflow_id = %workflow_id,
                    code = e.error_code(),
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Error updating workflow"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn page(ids: &[&str], next: Option<&str>) -> WorkflowPage {
        WorkflowPage {
            data: Some(ids.iter().map(|id| json!({ "id": id })).collect()),
            next_cursor: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn collect_pages_follows_cursors() {
        let seen = RefCell::new(Vec::new());
        let workflows = collect_pages(|cursor| {
            seen.borrow_mut().push(cursor.clone());
            async move {
                Ok(match cursor.as_deref() {
                    None => page(&["a", "b"], Some("c1")),
                    Some("c1") => page(&["c"], Some("c2")),
                    _ => page(&["d"], None),
                })
            }
        })
        .await;

        assert_eq!(
            workflows,
            vec![json!({"id": "a"}), json!({"id": "b"}), json!({"id": "c"}), json!({"id": "d"})]
        );
        assert_eq!(
            seen.into_inner(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn collect_pages_keeps_partial_results_on_error() {
        let workflows = collect_pages(|cursor| async move {
            match cursor {
                None => Ok(page(&["a"], Some("next"))),
                Some(_) => Err(AppError::Transport("connection reset".to_string())),
            }
        })
        .await;

        assert_eq!(workflows, vec![json!({"id": "a"})]);
    }

    #[tokio::test]
    async fn collect_pages_treats_empty_cursor_as_last_page() {
        let workflows =
            collect_pages(|_| async { Ok(WorkflowPage { data: None, next_cursor: Some(String::new()) }) })
                .await;
        assert!(workflows.is_empty());
    }

    #[test]
    fn workflow_ids_are_path_encoded() {
        assert_eq!(workflow_path("abc"), "/workflows/abc");
        assert_eq!(workflow_path("a/b c"), "/workflows/a%2Fb%20c");
    }
}
