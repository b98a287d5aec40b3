//! Render command implementation.
//!
//! Shapes the spec with the TypeScript backend and prints the rendered
//! declaration files. Writing them to disk is left to the caller.

use super::common;
use super::shape::shape_spec;
use crate::cli::{ExitCode, OutputFormat};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use colored::Colorize;
use sdkgen_codegen::{GeneratedCode, GeneratedFile, template_engine::TemplateEngine, typescript};
use sdkgen_core::Spec;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Renders every declaration file of `spec`.
///
/// # Errors
///
/// Returns [`sdkgen_core::Error::RenderError`] if a template fails.
pub fn render_spec(spec: &Spec) -> sdkgen_core::Result<GeneratedCode> {
    let shaped = shape_spec(spec, false);
    let engine = TemplateEngine::new()?;
    typescript::render(&engine, &shaped)
}

/// Lays out files for the terminal: a `// path` banner above each file.
#[must_use]
pub fn format_files<'a>(files: impl IntoIterator<Item = &'a GeneratedFile>) -> String {
    let mut out = String::new();
    for (i, file) in files.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "// {}", file.path());
        out.push_str(file.content());
        if !file.content().ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Runs the render command.
///
/// With `file`, only that generated file is printed. JSON output carries
/// paths and contents; the other formats print the files themselves.
///
/// # Errors
///
/// Returns an error if the output cannot be formatted. Document, IR and
/// template errors are reported and mapped to a non-zero exit code.
pub fn run(
    document: &Path,
    config: Option<&Path>,
    qa: bool,
    file: Option<&str>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!(document = %document.display(), "Rendering document");

    let code = match common::build_spec(document, config, qa).and_then(|spec| render_spec(&spec)) {
        Ok(code) => code,
        Err(err) => return Ok(common::report(&err)),
    };
    info!(files = code.file_count(), "Rendered declarations");

    let selected: Vec<&GeneratedFile> = match file {
        Some(path) => {
            let Some(found) = code.file(path) else {
                eprintln!("{} no generated file '{path}'", "error:".red().bold());
                return Ok(ExitCode::INVALID_INPUT);
            };
            vec![found]
        }
        None => code.files().collect(),
    };

    let output = match output_format {
        OutputFormat::Json => {
            format_output(&selected, output_format).context("failed to format generated files")?
        }
        OutputFormat::Text | OutputFormat::Pretty => format_files(selected),
    };
    print!("{output}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DOCUMENT: &str = r##"{
        "paths": {},
        "components": {"schemas": {
            "Tax": {"type": "string", "enum": ["inclusive", "exclusive"]},
            "Item": {
                "type": "object",
                "x-cb-resource-id": "item",
                "properties": {"tax": {"$ref": "#/components/schemas/Tax"}}
            }
        }}
    }"##;

    fn spec() -> Spec {
        let doc = sdkgen_core::Document::from_json(DOCUMENT).unwrap();
        Spec::build(&doc, &sdkgen_core::GenerationConfig::default()).unwrap()
    }

    #[test]
    fn test_render_spec_emits_resource_and_enums() {
        let code = render_spec(&spec()).unwrap();

        let item = code.file("Item.d.ts").unwrap().content();
        assert!(item.contains("export interface Item {"));
        assert!(item.contains("tax?: Tax;"));
        let enums = code.file("enums.d.ts").unwrap().content();
        assert!(enums.contains("export type Tax ="));
    }

    #[test]
    fn test_format_files_adds_banners() {
        let files = [
            GeneratedFile {
                path: "A.d.ts".to_string(),
                content: "export interface A {}".to_string(),
            },
            GeneratedFile {
                path: "B.d.ts".to_string(),
                content: "export interface B {}\n".to_string(),
            },
        ];

        let out = format_files(&files);
        assert_eq!(
            out,
            "// A.d.ts\nexport interface A {}\n\n// B.d.ts\nexport interface B {}\n"
        );
    }

    #[test]
    fn test_run_unknown_file() {
        let mut doc = NamedTempFile::new().unwrap();
        doc.write_all(DOCUMENT.as_bytes()).unwrap();

        let code = run(doc.path(), None, false, Some("Nope.d.ts"), OutputFormat::Text).unwrap();
        assert_eq!(code, ExitCode::INVALID_INPUT);
    }

    #[test]
    fn test_run_single_file() {
        let mut doc = NamedTempFile::new().unwrap();
        doc.write_all(DOCUMENT.as_bytes()).unwrap();

        let code = run(doc.path(), None, false, Some("Item.d.ts"), OutputFormat::Json).unwrap();
        assert!(code.is_success());
    }
}
