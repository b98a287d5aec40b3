//! Inspect command implementation.
//!
//! Builds the IR from a document and prints a summary of what a backend
//! would see: resources, their actions and enums, and the resolved version.

use super::common;
use crate::cli::{ExitCode, OutputFormat};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use sdkgen_core::{Resource, Spec};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Summary of a built spec.
#[derive(Debug, Serialize)]
pub struct SpecSummary {
    /// Document title
    pub title: Option<String>,
    /// Resolved version, e.g. `V2/PC2`
    pub version: String,
    /// QA mode was on
    pub qa_mode: bool,
    /// Resources in output order
    pub resources: Vec<ResourceSummary>,
    /// Global enum names
    pub enums: Vec<String>,
    /// Schema-less enum names
    pub schema_less_enums: Vec<String>,
}

/// Summary of one resource.
#[derive(Debug, Serialize)]
pub struct ResourceSummary {
    /// Resource id
    pub id: String,
    /// Type name
    pub name: String,
    /// Attribute count
    pub attributes: usize,
    /// Action names in output order
    pub actions: Vec<String>,
    /// Sub-resource type names
    pub sub_resources: Vec<String>,
    /// Local enum names
    pub local_enums: Vec<String>,
}

impl SpecSummary {
    /// Summarizes a built spec.
    #[must_use]
    pub fn from_spec(spec: &Spec) -> Self {
        Self {
            title: spec.title().map(str::to_string),
            version: spec.version().to_string(),
            qa_mode: spec.qa_mode(),
            resources: spec.resources().iter().map(ResourceSummary::from_resource).collect(),
            enums: spec.enums().iter().map(|e| e.name().to_string()).collect(),
            schema_less_enums: spec
                .schema_less_enums()
                .iter()
                .map(|e| e.name().to_string())
                .collect(),
        }
    }
}

impl ResourceSummary {
    fn from_resource(resource: &Resource) -> Self {
        Self {
            id: resource.id().to_string(),
            name: resource.name().to_string(),
            attributes: resource.attributes().len(),
            actions: resource.actions().iter().map(|a| a.name().to_string()).collect(),
            sub_resources: resource
                .sub_resources()
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
            local_enums: resource
                .local_enums()
                .iter()
                .map(|e| e.name().to_string())
                .collect(),
        }
    }
}

/// Runs the inspect command.
///
/// # Errors
///
/// Returns an error if the summary cannot be formatted. Document and IR
/// errors are reported and mapped to a non-zero exit code.
pub fn run(
    document: &Path,
    config: Option<&Path>,
    qa: bool,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!(document = %document.display(), qa, "Inspecting document");

    let spec = match common::build_spec(document, config, qa) {
        Ok(spec) => spec,
        Err(err) => return Ok(common::report(&err)),
    };

    let summary = SpecSummary::from_spec(&spec);
    let output = format_output(&summary, output_format).context("failed to format summary")?;
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdkgen_core::{Document, GenerationConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT: &str = r##"{
        "info": {"title": "Shop"},
        "paths": {
            "/orders": {"get": {
                "operationId": "list_orders",
                "x-cb-operation-method-name": "list",
                "x-cb-resource-id": "order",
                "x-cb-operation-is-list": true
            }}
        },
        "components": {"schemas": {
            "Order": {
                "type": "object",
                "x-cb-resource-id": "order",
                "properties": {
                    "id": {"type": "string"},
                    "status": {"type": "string", "enum": ["open", "closed"]}
                }
            }
        }}
    }"##;

    #[test]
    fn test_summary_from_spec() {
        let doc = Document::from_json(DOCUMENT).unwrap();
        let spec = Spec::build(&doc, &GenerationConfig::default()).unwrap();
        let summary = SpecSummary::from_spec(&spec);

        assert_eq!(summary.title.as_deref(), Some("Shop"));
        assert_eq!(summary.version, "V2/PC2");
        assert_eq!(summary.resources.len(), 1);

        let order = &summary.resources[0];
        assert_eq!(order.id, "order");
        assert_eq!(order.attributes, 2);
        assert_eq!(order.actions, vec!["list"]);
        assert_eq!(order.local_enums, vec!["order_status"]);
    }

    #[test]
    fn test_run_success() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let code = run(file.path(), None, false, OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_run_invalid_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let code = run(file.path(), None, false, OutputFormat::Text).unwrap();
        assert_eq!(code, ExitCode::INVALID_INPUT);
    }
}
