//! Command implementations for the SDK generator CLI.
//!
//! Each command loads the document, builds the IR, and formats its output
//! according to the requested format. IR and template errors are reported
//! on stderr and turned into exit codes; only I/O and formatting failures
//! propagate as errors.

pub mod common;
pub mod inspect;
pub mod render;
pub mod shape;
