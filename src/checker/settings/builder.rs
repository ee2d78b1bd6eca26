//! Builder for constructing Settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::checker::error::{Error, Result};
use crate::checker::resolver::ResolutionStrategy;

use super::Settings;

/// Builder for [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use shellcheck_runner::checker::{ResolutionStrategy, SettingsBuilder};
///
/// # fn example() -> shellcheck_runner::checker::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_dir("target")
///     .strategy(ResolutionStrategy::External)
///     .external_binary("/usr/bin/shellcheck")
///     .files(vec!["scripts/build.sh".into(), "scripts/deploy.sh".into()])
///     .fail_on_warnings(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    files: Vec<PathBuf>,
    tool_args: Vec<String>,
    files_per_run: Option<usize>,
    fail_on_warnings: bool,
    strategy: Option<ResolutionStrategy>,
    external_binary: Option<PathBuf>,
    url_overrides: HashMap<String, Url>,
    output_dir: Option<PathBuf>,
    resource_root: Option<PathBuf>,
    execution_id: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the ordered list of files to check.
    pub fn files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    /// Sets the extra command-line arguments passed to the tool.
    pub fn tool_args(mut self, args: Vec<String>) -> Self {
        self.tool_args = args;
        self
    }

    /// Sets the maximum number of files per invocation.
    ///
    /// Values `<= 0` are normalized to "unbounded", which is also the
    /// default: one invocation receives the entire file list.
    pub fn files_per_run(mut self, files_per_run: i64) -> Self {
        self.files_per_run = usize::try_from(files_per_run).ok().filter(|n| *n > 0);
        self
    }

    /// Sets whether non-zero tool exits fail the overall execution.
    pub fn fail_on_warnings(mut self, fail: bool) -> Self {
        self.fail_on_warnings = fail;
        self
    }

    /// Sets the binary resolution strategy.
    ///
    /// Defaults to [`ResolutionStrategy::Download`].
    pub fn strategy(mut self, strategy: ResolutionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the externally supplied binary path or bare program name.
    pub fn external_binary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.external_binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the download URL override map, keyed by platform key.
    pub fn url_overrides(mut self, overrides: HashMap<String, Url>) -> Self {
        self.url_overrides = overrides;
        self
    }

    /// Sets the output directory for resolved binaries and captures.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundled-resource root directory.
    pub fn resource_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resource_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the execution label embedded in run ids and capture names.
    ///
    /// Defaults to `"default"`.
    pub fn execution_id<S: Into<String>>(mut self, id: S) -> Self {
        self.execution_id = Some(id.into());
        self
    }

    /// Builds the [`Settings`], validating required fields.
    pub fn build(self) -> Result<Settings> {
        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::GenericError("output directory is required".into()))?;

        Ok(Settings {
            files: self.files,
            tool_args: self.tool_args,
            files_per_run: self.files_per_run,
            fail_on_warnings: self.fail_on_warnings,
            strategy: self.strategy.unwrap_or(ResolutionStrategy::Download),
            external_binary: self.external_binary,
            url_overrides: self.url_overrides,
            output_dir,
            resource_root: self.resource_root,
            execution_id: self.execution_id.unwrap_or_else(|| "default".into()),
        })
    }
}
