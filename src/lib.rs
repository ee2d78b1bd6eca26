//! Chunked shellcheck execution with pluggable binary resolution
//!
//! This library resolves a platform-appropriate shellcheck binary - from an
//! external path, a downloaded release archive, or a bundled resource - and
//! drives it over a list of shell files, splitting oversized lists into
//! multiple invocations and folding the per-run exit codes into a single
//! pass/fail verdict.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod checker;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result, RunnerError};
