//! SDK generator CLI.
//!
//! Command-line interface for building the IR from a vendor-extended API
//! description and shaping it with the TypeScript backend.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `inspect` - Build the IR and summarize resources and enums
//! - `shape` - Print the backend-shaped output
//! - `render` - Print the rendered TypeScript declaration files
//!
//! # Examples
//!
//! ```bash
//! # Summarize a document
//! sdkgen inspect openapi.json
//!
//! # Shape one resource, including hidden elements
//! sdkgen --format json shape openapi.json --qa --resource customer
//!
//! # Print one declaration file
//! sdkgen render openapi.json --file Customer.d.ts
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sdkgen_cli::cli::{ExitCode, OutputFormat};
use sdkgen_cli::commands;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// SDK generator - build and shape an SDK model from an API description.
#[derive(Parser, Debug)]
#[command(name = "sdkgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the IR and print a summary.
    Inspect {
        /// API description document (JSON)
        document: PathBuf,

        /// Generation config file (TOML)
        #[arg(short, long, env = "SDKGEN_CONFIG")]
        config: Option<PathBuf>,

        /// Include hidden and internal elements
        #[arg(long)]
        qa: bool,
    },

    /// Print the TypeScript-shaped output.
    Shape {
        /// API description document (JSON)
        document: PathBuf,

        /// Generation config file (TOML)
        #[arg(short, long, env = "SDKGEN_CONFIG")]
        config: Option<PathBuf>,

        /// Include hidden and internal elements
        #[arg(long)]
        qa: bool,

        /// Shape only the resource with this id
        #[arg(short, long)]
        resource: Option<String>,

        /// Shape resources in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Print rendered TypeScript declaration files.
    Render {
        /// API description document (JSON)
        document: PathBuf,

        /// Generation config file (TOML)
        #[arg(short, long, env = "SDKGEN_CONFIG")]
        config: Option<PathBuf>,

        /// Include hidden and internal elements
        #[arg(long)]
        qa: bool,

        /// Print only this generated file, e.g. `Customer.d.ts`
        #[arg(long)]
        file: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json);

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .context("failed to parse --format")?;

    let exit_code = execute_command(cli.command, output_format)?;

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging on stderr so stdout carries only command output.
fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Routes a command to its handler.
fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Inspect {
            document,
            config,
            qa,
        } => commands::inspect::run(&document, config.as_deref(), qa, output_format),
        Commands::Shape {
            document,
            config,
            qa,
            resource,
            parallel,
        } => {
            let options = commands::shape::ShapeOptions {
                config: config.as_deref(),
                qa,
                resource: resource.as_deref(),
                parallel,
            };
            commands::shape::run(&document, &options, output_format)
        }
        Commands::Render {
            document,
            config,
            qa,
            file,
        } => commands::render::run(&document, config.as_deref(), qa, file.as_deref(), output_format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_inspect() {
        let cli = Cli::parse_from(["sdkgen", "inspect", "openapi.json"]);
        if let Commands::Inspect {
            document, config, qa,
        } = cli.command
        {
            assert_eq!(document, PathBuf::from("openapi.json"));
            assert_eq!(config, None);
            assert!(!qa);
        } else {
            panic!("Expected Inspect command");
        }
    }

    #[test]
    fn test_cli_parsing_shape_with_options() {
        let cli = Cli::parse_from([
            "sdkgen",
            "shape",
            "openapi.json",
            "--qa",
            "--resource",
            "customer",
            "--config",
            "sdkgen.toml",
            "--parallel",
        ]);
        if let Commands::Shape {
            qa,
            resource,
            config,
            parallel,
            ..
        } = cli.command
        {
            assert!(qa);
            assert!(parallel);
            assert_eq!(resource.as_deref(), Some("customer"));
            assert_eq!(config, Some(PathBuf::from("sdkgen.toml")));
        } else {
            panic!("Expected Shape command");
        }
    }

    #[test]
    fn test_cli_parsing_render() {
        assert!(Cli::try_parse_from(["sdkgen", "render"]).is_err());

        let cli = Cli::parse_from(["sdkgen", "render", "openapi.json", "--file", "Plan.d.ts"]);
        if let Commands::Render { document, file, .. } = cli.command {
            assert_eq!(document, PathBuf::from("openapi.json"));
            assert_eq!(file.as_deref(), Some("Plan.d.ts"));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["sdkgen", "--verbose", "inspect", "openapi.json"]);
        assert!(cli.verbose);
        assert!(!cli.log_json);
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["sdkgen", "inspect", "openapi.json"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_output_format_custom() {
        let cli = Cli::parse_from(["sdkgen", "--format", "json", "shape", "openapi.json"]);
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_cli_requires_document() {
        assert!(Cli::try_parse_from(["sdkgen", "shape"]).is_err());
    }
}
