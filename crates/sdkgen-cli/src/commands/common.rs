//! Loading helpers shared by the commands.
//!
//! Read failures stay core [`Error`] values rather than `anyhow` errors so
//! [`ExitCode::for_error`] can still tell config problems from bad input.

use crate::cli::ExitCode;
use colored::Colorize;
use sdkgen_core::{Document, Error, GenerationConfig, Result, Spec};
use std::path::Path;
use tracing::{debug, error};

/// Loads the generation config.
///
/// Reads `config_path` as TOML when given, defaults otherwise. `--qa`
/// forces QA mode on regardless of the file.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if the file cannot be read or is invalid.
pub fn load_config(config_path: Option<&Path>, qa: bool) -> Result<GenerationConfig> {
    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
                message: format!("failed to read config {}: {e}", path.display()),
            })?;
            GenerationConfig::from_toml_str(&content)?
        }
        None => GenerationConfig::default(),
    };
    if qa {
        config.qa_mode = true;
    }
    config.validate()?;
    debug!(?config, "Loaded generation config");
    Ok(config)
}

/// Reads and parses an API description document.
///
/// # Errors
///
/// Returns [`Error::DocumentParse`] if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::DocumentParse {
        message: format!("failed to read {}: {e}", path.display()),
        source: None,
    })?;
    Document::from_json(&content)
}

/// Loads the config and document and builds the IR.
///
/// # Errors
///
/// Returns the first load or construction error.
pub fn build_spec(document: &Path, config_path: Option<&Path>, qa: bool) -> Result<Spec> {
    let config = load_config(config_path, qa)?;
    let doc = load_document(document)?;
    Spec::build(&doc, &config)
}

/// Logs and prints a core error, returning the matching exit code.
#[must_use]
pub fn report(err: &Error) -> ExitCode {
    error!(error = %err, "Generation failed");
    eprintln!("{} {err}", "error:".red().bold());
    ExitCode::for_error(err)
}
