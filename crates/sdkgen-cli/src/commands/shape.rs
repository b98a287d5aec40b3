//! Shape command implementation.
//!
//! Runs the TypeScript backend over the IR and prints the shaped output,
//! either for the whole spec or for a single resource.

use super::common;
use crate::cli::{ExitCode, OutputFormat};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use colored::Colorize;
use sdkgen_codegen::{ShapedSpec, Shaper, TypeScriptBackend};
use sdkgen_core::Spec;
use std::path::Path;
use tracing::info;

/// Options of the shape command.
#[derive(Debug, Clone, Default)]
pub struct ShapeOptions<'a> {
    /// Optional TOML config file
    pub config: Option<&'a Path>,
    /// Include hidden and internal elements
    pub qa: bool,
    /// Shape only this resource id
    pub resource: Option<&'a str>,
    /// Shape resources on the thread pool
    pub parallel: bool,
}

/// Shapes the whole spec with the TypeScript backend.
#[must_use]
pub fn shape_spec(spec: &Spec, parallel: bool) -> ShapedSpec {
    let backend = TypeScriptBackend::new();
    let shaper = Shaper::new(&backend);
    if parallel {
        #[cfg(feature = "parallel")]
        return shaper.shape_spec_parallel(spec);
        #[cfg(not(feature = "parallel"))]
        tracing::warn!("Built without the parallel feature, shaping sequentially");
    }
    shaper.shape_spec(spec)
}

/// Runs the shape command.
///
/// # Errors
///
/// Returns an error if the output cannot be formatted. Document and IR
/// errors are reported and mapped to a non-zero exit code.
pub fn run(
    document: &Path,
    options: &ShapeOptions<'_>,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!(document = %document.display(), qa = options.qa, "Shaping document");

    let spec = match common::build_spec(document, options.config, options.qa) {
        Ok(spec) => spec,
        Err(err) => return Ok(common::report(&err)),
    };

    let output = if let Some(id) = options.resource {
        let Some(resource) = spec.resource(id) else {
            eprintln!("{} unknown resource '{id}'", "error:".red().bold());
            return Ok(ExitCode::INVALID_INPUT);
        };
        let backend = TypeScriptBackend::new();
        format_output(&Shaper::new(&backend).shape_resource(resource), output_format)
            .with_context(|| format!("failed to format resource '{id}'"))?
    } else {
        format_output(&shape_spec(&spec, options.parallel), output_format)
            .context("failed to format shaped spec")?
    };

    println!("{output}");
    Ok(ExitCode::SUCCESS)
}
