//! Output formatters for CLI commands.
//!
//! Every command prints through [`format_output`], so `--format` behaves
//! the same everywhere.

use crate::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Formats data according to the output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use sdkgen_cli::cli::OutputFormat;
/// use sdkgen_cli::formatters::format_output;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct ResourceInfo {
///     id: String,
///     actions: usize,
/// }
///
/// let info = ResourceInfo { id: "customer".to_string(), actions: 3 };
/// let output = format_output(&info, OutputFormat::Json)?;
/// assert!(output.contains("\"id\""));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text => Ok(serde_json::to_string(data)?),
        OutputFormat::Pretty => {
            let value = serde_json::to_value(data)?;
            let mut out = String::new();
            write_tree(&mut out, None, &value, 0);
            Ok(out.trim_end().to_string())
        }
    }
}

/// Writes `value` as an indented key/value tree.
///
/// Nulls, empty arrays and empty objects are omitted so shaped output stays
/// readable.
fn write_tree(out: &mut String, key: Option<&str>, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    let label = key.map(|k| format!("{}: ", k.blue().bold())).unwrap_or_default();
    match value {
        Value::Null => {}
        Value::Array(items) if items.is_empty() => {}
        Value::Object(map) if map.is_empty() => {}
        Value::Bool(b) => {
            let _ = writeln!(out, "{indent}{label}{}", b.to_string().yellow());
        }
        Value::Number(n) => {
            let _ = writeln!(out, "{indent}{label}{}", n.to_string().cyan());
        }
        Value::String(s) => {
            let _ = writeln!(out, "{indent}{label}{}", s.green());
        }
        Value::Array(items) => {
            if let Some(k) = key {
                let _ = writeln!(out, "{indent}{}", k.blue().bold());
            }
            for item in items {
                let _ = writeln!(out, "{indent}  {}", "-".dimmed());
                write_tree(out, None, item, depth + 2);
            }
        }
        Value::Object(map) => {
            let child_depth = if let Some(k) = key {
                let _ = writeln!(out, "{indent}{}", k.blue().bold());
                depth + 1
            } else {
                depth
            };
            for (k, v) in map {
                write_tree(out, Some(k), v, child_depth);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Summary {
        id: String,
        attributes: usize,
        hidden: bool,
        path_name: Option<String>,
        actions: Vec<String>,
    }

    fn summary() -> Summary {
        Summary {
            id: "invoice".to_string(),
            attributes: 12,
            hidden: false,
            path_name: None,
            actions: vec!["list".to_string(), "retrieve".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let output = format_output(&summary(), OutputFormat::Json).unwrap();
        assert!(output.contains("\"id\": \"invoice\""));
        assert!(output.contains("\"path_name\": null"));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_text_format_is_single_line() {
        let output = format_output(&summary(), OutputFormat::Text).unwrap();
        assert!(!output.contains('\n'));
        assert!(output.contains("\"attributes\":12"));
    }

    #[test]
    fn test_pretty_format_tree() {
        colored::control::set_override(false);
        let output = format_output(&summary(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("id: invoice"));
        assert!(output.contains("attributes: 12"));
        assert!(output.contains("hidden: false"));
        assert!(output.contains("actions"));
        assert!(output.contains("list"));
        // nulls are skipped
        assert!(!output.contains("path_name"));
    }

    #[test]
    fn test_pretty_format_nested_objects() {
        colored::control::set_override(false);
        let value = serde_json::json!({"imports": {"enums": ["AutoCollection"], "resources": []}});
        let output = format_output(&value, OutputFormat::Pretty).unwrap();
        assert!(output.contains("imports"));
        assert!(output.contains("  enums"));
        assert!(output.contains("AutoCollection"));
        assert!(!output.contains("resources"));
    }
}
