//! JSON execution report persisted next to the capture files.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::{ErrorExt, Result};
use super::runner::RunResult;

/// Summary of one whole execution, serialized as pretty JSON.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Normalized platform key the binary was resolved for.
    pub platform_key: String,

    /// Resolution strategy that produced the binary.
    pub strategy: String,

    /// Absolute path of the binary that ran.
    pub binary: PathBuf,

    /// SHA-256 of the binary that ran.
    pub binary_sha256: String,

    /// Whether non-zero exits were configured to fail the execution.
    pub fail_on_warnings: bool,

    /// Total number of runs performed.
    pub total_runs: usize,

    /// Number of runs with non-zero exit codes.
    pub failed_runs: usize,

    /// Per-run records, in run order.
    pub runs: Vec<RunResult>,
}

impl CheckReport {
    /// Writes the report to `path` as pretty-printed JSON.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, bytes)
            .await
            .fs_context("writing check report", path)?;
        Ok(())
    }
}
