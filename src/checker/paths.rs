//! Paths for runner outputs under the caller-supplied output directory.

use std::path::{Path, PathBuf};

/// Layout of the runner's dedicated subdirectory of the output directory.
///
/// Everything the runner writes - the resolved binary, unpacked release
/// archives, capture files, the JSON report - lands under one
/// `shellcheck-runner/` subtree so repeated executions are easy to locate
/// and clean up. The runner itself never deletes anything here.
#[derive(Clone, Debug)]
pub struct RunnerPaths {
    root: PathBuf,
}

impl RunnerPaths {
    /// Creates the path layout rooted under `output_dir`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            root: output_dir.join("shellcheck-runner"),
        }
    }

    /// The runner's output subdirectory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A path inside the runner's output subdirectory.
    pub fn in_output_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Capture file for a run's standard output.
    pub fn stdout_capture(&self, run_id: &str) -> PathBuf {
        self.in_output_dir(&format!("shellcheck.{run_id}.stdout"))
    }

    /// Capture file for a run's standard error.
    pub fn stderr_capture(&self, run_id: &str) -> PathBuf {
        self.in_output_dir(&format!("shellcheck.{run_id}.stderr"))
    }

    /// The JSON report summarizing a whole execution.
    pub fn report(&self, execution_id: &str) -> PathBuf {
        self.in_output_dir(&format!("shellcheck.{execution_id}.report.json"))
    }
}
