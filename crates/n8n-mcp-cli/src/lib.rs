//! Helpers for the `n8n-workflows` command-line tool.

use std::path::Path;

use anyhow::Context;
use n8n_mcp_core::{validate_workflow, ValidationOptions, ValidationReport, Workflow};
use n8n_mcp_infra::{init_telemetry, LogTarget, TelemetryConfig};
use n8n_mcp_services::read_workflow_file;

/// Upper-case the first character and lower-case the rest ("errorHandling" -> "Errorhandling").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("  {}:\n", title));
    for item in items {
        out.push_str(&format!("    - {}\n", item));
    }
}

/// Human-readable validation report. `fallback_name` is shown when the
/// workflow has no name.
pub fn render_report(report: &ValidationReport, fallback_name: &str) -> String {
    let name = report.workflow.name.as_deref().unwrap_or(fallback_name);

    let mut out = format!(
        "Workflow Validation Results:\n\
         ==========================\n\
         Workflow: {}\n\
         Strictness: {}\n\
         Passed: {}\n\
         Total Issues: {}\n",
        name,
        report.strictness,
        yes_no(report.passed),
        report.total_issues
    );

    for (category, result) in &report.results {
        out.push_str(&format!(
            "\n{}:\n  Passed: {}\n",
            capitalize(category.as_str()),
            yes_no(result.passed)
        ));
        push_list(&mut out, "Issues", &result.issues);
        push_list(&mut out, "Suggestions", &result.suggestions);
    }

    out
}

/// Validate a local workflow file (raw or enriched) and render the report.
pub async fn validate_file(file: &Path, options: &ValidationOptions) -> anyhow::Result<String> {
    let document = read_workflow_file(file)
        .await
        .with_context(|| format!("Error validating workflow file {}", file.display()))?;

    let report = validate_workflow(&Workflow::from_value(&document), options);
    Ok(render_report(&report, &file.display().to_string()))
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays clean
/// for reports and JSON output.
pub fn init_tracing() -> anyhow::Result<()> {
    init_telemetry(&TelemetryConfig::from_env(LogTarget::Stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use n8n_mcp_core::Strictness;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn capitalize_matches_title_style() {
        assert_eq!(capitalize("naming"), "Naming");
        assert_eq!(capitalize("errorHandling"), "Errorhandling");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn report_lists_issues_and_suggestions() {
        let workflow = Workflow::from_value(&json!({"name": "Tiny", "tags": ["x"]}));
        let options = ValidationOptions::from_names(Strictness::Medium, ["naming"]);
        let report = validate_workflow(&workflow, &options);

        let text = render_report(&report, "ignored.json");
        let expected = "Workflow Validation Results:\n\
==========================\n\
Workflow: Tiny\n\
Strictness: medium\n\
Passed: No\n\
Total Issues: 1\n\
\n\
Naming:\n\
\x20 Passed: No\n\
\x20 Issues:\n\
\x20   - Workflow name is too short\n\
\x20 Suggestions:\n\
\x20   - Use a more descriptive name that indicates the workflow's purpose\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn report_falls_back_to_file_name() {
        let report = validate_workflow(
            &Workflow::default(),
            &ValidationOptions::from_names(Strictness::Low, ["performance"]),
        );
        let text = render_report(&report, "flows/a.json");
        let expected = "Workflow Validation Results:\n\
==========================\n\
Workflow: flows/a.json\n\
Strictness: low\n\
Passed: Yes\n\
Total Issues: 0\n\
\n\
Performance:\n\
\x20 Passed: Yes\n";
        assert_eq!(text, expected);
        assert!(!text.contains("  Issues:"));
    }

    #[tokio::test]
    async fn validate_file_unwraps_enriched_records() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("Ops:Tiny.json");
        let enriched = json!({
            "id": "w1",
            "originalWorkflow": {"name": "Tiny", "tags": ["x"]}
        });
        std::fs::write(&path, enriched.to_string()).unwrap();

        let options = ValidationOptions::from_names(Strictness::Medium, ["naming"]);
        let text = validate_file(&path, &options).await.unwrap();

        assert!(text.starts_with("Workflow Validation Results:\n"));
        assert!(text.contains("Workflow: Tiny\n"));
        assert!(text.contains("    - Workflow name is too short\n"));
    }

    #[tokio::test]
    async fn validate_file_reports_unreadable_file() {
        let root = TempDir::new().unwrap();
        let err = validate_file(&root.path().join("missing.json"), &ValidationOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Error validating workflow file"));
    }
}
