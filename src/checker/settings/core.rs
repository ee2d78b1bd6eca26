//! Core Settings struct and accessors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::checker::resolver::ResolutionStrategy;

/// Main settings for a checker execution.
///
/// Central configuration constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). Immutable once built; the
/// orchestrator and resolver only read from it.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Files to check, in invocation order.
    pub(super) files: Vec<PathBuf>,

    /// Extra command-line arguments passed to every shellcheck invocation,
    /// before the file paths.
    pub(super) tool_args: Vec<String>,

    /// Maximum number of files per invocation.
    ///
    /// `None` means unbounded: a single invocation receives the whole list.
    pub(super) files_per_run: Option<usize>,

    /// Whether any non-zero exit code should fail the overall execution.
    pub(super) fail_on_warnings: bool,

    /// How the shellcheck binary is obtained.
    pub(super) strategy: ResolutionStrategy,

    /// Externally supplied binary, used only by the external strategy.
    ///
    /// A bare program name is looked up on PATH.
    pub(super) external_binary: Option<PathBuf>,

    /// Release-archive URL overrides keyed by normalized platform key
    /// (e.g. `linux-x86_64`), consulted before the built-in defaults.
    pub(super) url_overrides: HashMap<String, Url>,

    /// Directory receiving the resolved binary, capture files and report.
    pub(super) output_dir: PathBuf,

    /// Root directory of bundled shellcheck resources.
    ///
    /// `None` means the default: a `shellcheck-bin/` directory next to the
    /// current executable.
    pub(super) resource_root: Option<PathBuf>,

    /// Label distinguishing multiple configured executions; embedded in run
    /// ids and capture file names.
    pub(super) execution_id: String,
}

impl Settings {
    /// Returns the files to check, in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the extra shellcheck arguments, in order.
    pub fn tool_args(&self) -> &[String] {
        &self.tool_args
    }

    /// Returns the maximum files per invocation, `None` for unbounded.
    pub fn files_per_run(&self) -> Option<usize> {
        self.files_per_run
    }

    /// Returns whether non-zero tool exits fail the execution.
    pub fn fail_on_warnings(&self) -> bool {
        self.fail_on_warnings
    }

    /// Returns the binary resolution strategy.
    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    /// Returns the externally supplied binary path, if any.
    pub fn external_binary(&self) -> Option<&Path> {
        self.external_binary.as_deref()
    }

    /// Returns the download URL override map.
    pub fn url_overrides(&self) -> &HashMap<String, Url> {
        &self.url_overrides
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the bundled-resource root override, if any.
    pub fn resource_root(&self) -> Option<&Path> {
        self.resource_root.as_deref()
    }

    /// Returns the execution label.
    pub fn execution_id(&self) -> &str {
        &self.execution_id
    }
}
