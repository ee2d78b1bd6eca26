//! Check orchestration and coordination.
//!
//! The [`Checker`] drives one whole execution: detect the platform, resolve
//! the binary, split the file list into invocations, run them serially in
//! input order, aggregate the exit codes, replay failed captures into the
//! log, persist the report, and apply the fail-on-warnings policy.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::aggregate::Aggregate;
use super::checksum::calculate_sha256;
use super::chunk::chunks;
use super::error::{Error, ErrorExt, Result};
use super::paths::RunnerPaths;
use super::report::CheckReport;
use super::resolver::{BinaryHandle, BinaryResolver, HttpArchiveFetcher};
use super::runner::{run, RunCounter, RunResult};
use super::settings::Settings;

/// Outcome of a successful (or policy-tolerated) execution.
#[derive(Debug)]
pub struct CheckOutcome {
    /// Total number of runs performed.
    pub total_runs: usize,

    /// Number of runs with non-zero exit codes.
    pub failed_runs: usize,

    /// Where the JSON report was written.
    pub report_path: PathBuf,
}

/// Main checker orchestrator.
///
/// # Examples
///
/// ```no_run
/// use shellcheck_runner::checker::{Checker, ResolutionStrategy, SettingsBuilder};
///
/// # async fn example() -> shellcheck_runner::checker::Result<()> {
/// let settings = SettingsBuilder::new()
///     .output_dir("target")
///     .strategy(ResolutionStrategy::Download)
///     .files(vec!["scripts/build.sh".into()])
///     .build()?;
///
/// let outcome = Checker::new(settings).check().await?;
/// println!("{}/{} runs failed", outcome.failed_runs, outcome.total_runs);
/// # Ok(())
/// # }
/// ```
pub struct Checker {
    settings: Settings,
    counter: RunCounter,
}

impl Checker {
    /// Creates a checker with a fresh run counter.
    pub fn new(settings: Settings) -> Self {
        Self::with_counter(settings, RunCounter::new())
    }

    /// Creates a checker sharing an externally owned run counter.
    ///
    /// Use this when several configured executions run inside one process
    /// and must not collide on capture file names.
    pub fn with_counter(settings: Settings, counter: RunCounter) -> Self {
        Self { settings, counter }
    }

    /// Executes the whole flow and returns the outcome.
    ///
    /// Fails with [`Error::ChecksFailed`] when runs reported problems and
    /// the fail-on-warnings policy is enabled; the report and the capture
    /// files are written either way.
    pub async fn check(&self) -> Result<CheckOutcome> {
        let paths = RunnerPaths::new(self.settings.output_dir());
        tokio::fs::create_dir_all(paths.root())
            .await
            .fs_context("creating runner output directory", paths.root())?;

        let resolver = BinaryResolver::new(&self.settings, HttpArchiveFetcher::new());
        let platform_key = resolver.platform_key();
        log::info!("os arch: [{platform_key}]");

        let binary = resolver.resolve(self.settings.strategy()).await?;
        log::info!("resolved shellcheck binary [{}]", binary.path().display());

        let mut runs = Vec::new();
        match self.settings.files_per_run() {
            None => {
                // a single invocation receives the whole list, even when empty
                let all = self.settings.files().to_vec();
                runs.push(self.run_chunk(&binary, &paths, all).await?);
            }
            Some(max) => {
                for chunk in chunks(self.settings.files().iter().cloned(), max)? {
                    runs.push(self.run_chunk(&binary, &paths, chunk).await?);
                }
            }
        }

        let aggregate = Aggregate::over(&runs);
        for failed in aggregate.failed_runs() {
            replay_captures(failed).await;
        }

        let failed_runs = aggregate.failed_runs().len();
        let total_runs = aggregate.total();

        let report = CheckReport {
            platform_key,
            strategy: self.settings.strategy().to_string(),
            binary: binary.path().to_path_buf(),
            binary_sha256: calculate_sha256(binary.path()).await?,
            fail_on_warnings: self.settings.fail_on_warnings(),
            total_runs,
            failed_runs,
            runs: runs.clone(),
        };
        let report_path = paths.report(self.settings.execution_id());
        report.write(&report_path).await?;

        if aggregate.should_fail(self.settings.fail_on_warnings()) {
            return Err(Error::ChecksFailed {
                failed: failed_runs,
                total: total_runs,
            });
        }

        Ok(CheckOutcome {
            total_runs,
            failed_runs,
            report_path,
        })
    }

    async fn run_chunk(
        &self,
        binary: &BinaryHandle,
        paths: &RunnerPaths,
        files: Vec<PathBuf>,
    ) -> Result<RunResult> {
        let run_id = format!("{}.{}", self.settings.execution_id(), self.counter.next());
        let stdout = paths.stdout_capture(&run_id);
        let stderr = paths.stderr_capture(&run_id);

        let started = Instant::now();
        let result = run(
            &run_id,
            binary,
            self.settings.tool_args(),
            &files,
            &stdout,
            &stderr,
        )
        .await?;
        log::debug!(
            "shellcheck run [{}] on [{}] files took [{}] millis",
            result.run_id(),
            files.len(),
            started.elapsed().as_millis()
        );

        Ok(result)
    }
}

/// Replays a failed run's captured output into the log.
async fn replay_captures(failed: &RunResult) {
    log::warn!(
        "------ shellcheck run [{}] returned [{}] stdout will follow ------",
        failed.run_id(),
        failed.exit_code()
    );
    for line in read_lines(failed.stdout()).await {
        log::warn!("{line}");
    }
    log::warn!(
        "------ shellcheck run [{}] returned [{}] stderr will follow ------",
        failed.run_id(),
        failed.exit_code()
    );
    for line in read_lines(failed.stderr()).await {
        log::error!("{line}");
    }
}

async fn read_lines(path: &Path) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(e) => vec![format!("<unreadable capture file {}: {e}>", path.display())],
    }
}
