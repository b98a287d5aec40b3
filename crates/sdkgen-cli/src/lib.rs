//! SDK generator CLI library.
//!
//! Exposes the command implementations and formatters so they can be
//! tested without spawning the binary.

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;

pub use cli::{ExitCode, OutputFormat};
