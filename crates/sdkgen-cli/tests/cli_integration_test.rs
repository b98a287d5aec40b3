//! Integration tests for the inspect, shape and render workflows.

use sdkgen_cli::commands::{common, inspect, render, shape};
use sdkgen_cli::{ExitCode, OutputFormat};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const DOCUMENT: &str = r##"{
    "info": {"title": "Billing"},
    "paths": {
        "/plans": {
            "get": {
                "operationId": "list_plans",
                "x-cb-operation-method-name": "list",
                "x-cb-resource-id": "plan",
                "x-cb-operation-is-list": true
            },
            "post": {
                "operationId": "create_plan",
                "x-cb-operation-method-name": "create",
                "x-cb-resource-id": "plan"
            }
        }
    },
    "components": {"schemas": {
        "Plan": {
            "type": "object",
            "x-cb-resource-id": "plan",
            "required": ["id"],
            "properties": {
                "id": {"type": "string"},
                "period_unit": {"type": "string", "enum": ["day", "week", "month"]},
                "price": {"type": "integer", "x-cb-is-money-column": true}
            }
        },
        "Sandbox": {
            "type": "object",
            "x-cb-resource-id": "sandbox",
            "x-cb-hidden-from-client-sdk": true,
            "properties": {"id": {"type": "string"}}
        }
    }}
}"##;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_build_spec_hides_resources_outside_qa() {
    let doc = write_temp(DOCUMENT);

    let spec = common::build_spec(doc.path(), None, false).unwrap();
    assert!(spec.resource("plan").is_some());
    assert!(spec.resource("sandbox").is_none());

    let qa = common::build_spec(doc.path(), None, true).unwrap();
    assert!(qa.resource("sandbox").is_some());
}

#[test]
fn test_config_file_enables_qa_mode() {
    let doc = write_temp(DOCUMENT);
    let config = write_temp("qa_mode = true\nmax_depth = 8\n");

    let spec = common::build_spec(doc.path(), Some(config.path()), false).unwrap();
    assert!(spec.qa_mode());
    assert!(spec.resource("sandbox").is_some());
}

#[test]
fn test_invalid_config_is_a_config_error() {
    let doc = write_temp(DOCUMENT);
    let config = write_temp("max_depth = 0\n");

    let err = common::build_spec(doc.path(), Some(config.path()), false).unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(ExitCode::for_error(&err), ExitCode::ERROR);
}

#[test]
fn test_inspect_summary_lists_resources() {
    let doc = write_temp(DOCUMENT);
    let spec = common::build_spec(doc.path(), None, false).unwrap();

    let summary = inspect::SpecSummary::from_spec(&spec);
    assert_eq!(summary.title.as_deref(), Some("Billing"));
    assert_eq!(summary.resources.len(), 1);

    let plan = &summary.resources[0];
    assert_eq!(plan.id, "plan");
    assert_eq!(plan.attributes, 3);
    assert_eq!(plan.actions.len(), 2);
}

#[test]
fn test_inspect_run_reports_bad_documents() {
    let doc = write_temp("{ not json");
    let code = inspect::run(doc.path(), None, false, OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::INVALID_INPUT);
    assert!(!code.is_success());
}

#[test]
fn test_shape_spec_is_deterministic() {
    let doc = write_temp(DOCUMENT);
    let spec = common::build_spec(doc.path(), None, false).unwrap();

    let first = serde_json::to_string(&shape::shape_spec(&spec, false)).unwrap();
    let second = serde_json::to_string(&shape::shape_spec(&spec, true)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_shape_run_rejects_unknown_resource() {
    let doc = write_temp(DOCUMENT);
    let options = shape::ShapeOptions {
        resource: Some("invoice"),
        ..shape::ShapeOptions::default()
    };

    let code = shape::run(doc.path(), &options, OutputFormat::Text).unwrap();
    assert_eq!(code, ExitCode::INVALID_INPUT);
}

#[test]
fn test_shape_run_single_resource() {
    let doc = write_temp(DOCUMENT);
    let options = shape::ShapeOptions {
        resource: Some("plan"),
        ..shape::ShapeOptions::default()
    };

    let code = shape::run(doc.path(), &options, OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
}

#[test]
fn test_render_emits_one_file_per_visible_resource() {
    let doc = write_temp(DOCUMENT);
    let spec = common::build_spec(doc.path(), None, false).unwrap();

    let code = render::render_spec(&spec).unwrap();
    assert_eq!(code.file_count(), 1);

    let plan = code.file("Plan.d.ts").unwrap().content();
    assert!(plan.contains("export interface Plan {"));
    assert!(plan.contains("id: string;"));
    assert!(plan.contains("period_unit?: 'day' | 'week' | 'month';"));
    assert!(plan.contains("price?: number;"));
    assert!(plan.contains("export namespace Plan {"));
    assert!(code.file("Sandbox.d.ts").is_none());
    assert!(code.file("enums.d.ts").is_none());
}

#[test]
fn test_render_in_qa_mode_includes_hidden_resources() {
    let doc = write_temp(DOCUMENT);
    let spec = common::build_spec(doc.path(), None, true).unwrap();

    let code = render::render_spec(&spec).unwrap();
    assert!(code.file("Sandbox.d.ts").is_some());
}

#[test]
fn test_render_run_missing_document() {
    let code = render::run(
        Path::new("/nonexistent/openapi.json"),
        None,
        false,
        None,
        OutputFormat::Text,
    )
    .unwrap();
    assert_eq!(code, ExitCode::INVALID_INPUT);
}

#[test]
fn test_unreadable_config_maps_to_config_exit_code() {
    let doc = write_temp(DOCUMENT);
    let missing = Path::new("/nonexistent/sdkgen.toml");

    let err = common::build_spec(doc.path(), Some(missing), false).unwrap_err();
    assert!(err.is_config_error());

    let code = inspect::run(doc.path(), Some(missing), false, OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::ERROR);
}
