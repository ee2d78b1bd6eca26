//! Child-process execution with output capture.
//!
//! One [`run`] per chunk of files: the resolved binary is launched with its
//! stdout/stderr redirected to per-run capture files, and the exit code is
//! recorded in an immutable [`RunResult`]. Non-zero exits are data here, not
//! errors.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use path_absolutize::Absolutize;
use serde::Serialize;

use super::error::{Error, ErrorExt, Result};
use super::resolver::BinaryHandle;

/// Monotonically increasing run-number source.
///
/// Passed explicitly into the orchestrator rather than hidden in a global,
/// so concurrent executions in one process never collide on capture file
/// names and tests can pin deterministic ids.
#[derive(Clone, Debug, Default)]
pub struct RunCounter {
    next: Arc<AtomicU64>,
}

impl RunCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a counter starting at an arbitrary value.
    pub fn starting_at(value: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(value)),
        }
    }

    /// Returns the next run number.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// The immutable record of one shellcheck run.
#[derive(Clone, Debug, Serialize)]
pub struct RunResult {
    run_id: String,
    cmd_line: Vec<String>,
    exit_code: i32,
    stdout: PathBuf,
    stderr: PathBuf,
}

impl RunResult {
    /// Builds a run record; normally only [`run`] does this.
    pub fn new(
        run_id: String,
        cmd_line: Vec<String>,
        exit_code: i32,
        stdout: PathBuf,
        stderr: PathBuf,
    ) -> Self {
        Self {
            run_id,
            cmd_line,
            exit_code,
            stdout,
            stderr,
        }
    }

    /// The run identifier, unique within a batch.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// The exact command line that was executed.
    pub fn cmd_line(&self) -> &[String] {
        &self.cmd_line
    }

    /// The child's exit code (signal deaths on Unix are recorded as the
    /// negated signal number).
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Path of the captured standard output.
    pub fn stdout(&self) -> &Path {
        &self.stdout
    }

    /// Path of the captured standard error.
    pub fn stderr(&self) -> &Path {
        &self.stderr
    }

    /// True if the exit code is non-zero.
    pub fn is_not_ok(&self) -> bool {
        self.exit_code != 0
    }
}

/// Runs the shellcheck binary on one chunk of files, capturing its output.
///
/// The command line is the binary's absolute path, then `args` in order,
/// then each file's absolute path in order. The call blocks until the child
/// terminates; no timeout is imposed. If Ctrl-C arrives while waiting, the
/// wait is abandoned (the child is left running) and
/// [`Error::Interrupted`] propagates.
pub async fn run(
    run_id: &str,
    binary: &BinaryHandle,
    args: &[String],
    files: &[PathBuf],
    stdout_path: &Path,
    stderr_path: &Path,
) -> Result<RunResult> {
    let mut cmd_line = Vec::with_capacity(1 + args.len() + files.len());
    cmd_line.push(binary.path().display().to_string());
    cmd_line.extend(args.iter().cloned());
    for file in files {
        let absolute = file.absolutize().fs_context("absolutizing input file", file)?;
        cmd_line.push(absolute.display().to_string());
    }

    let stdout_file = std::fs::File::create(stdout_path)
        .fs_context("creating stdout capture file", stdout_path)?;
    let stderr_file = std::fs::File::create(stderr_path)
        .fs_context("creating stderr capture file", stderr_path)?;

    log::debug!(
        "running shellcheck [{run_id}] on [{}] files",
        files.len()
    );

    let mut child = tokio::process::Command::new(&cmd_line[0])
        .args(&cmd_line[1..])
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file))
        .spawn()
        .map_err(|e| Error::CommandFailed {
            command: cmd_line.join(" "),
            error: e,
        })?;

    let status = tokio::select! {
        status = child.wait() => status.map_err(|e| Error::CommandFailed {
            command: cmd_line.join(" "),
            error: e,
        })?,
        _ = tokio::signal::ctrl_c() => {
            // abandon the wait; the child keeps its own fate
            return Err(Error::Interrupted {
                run_id: run_id.to_string(),
            });
        }
    };

    Ok(RunResult::new(
        run_id.to_string(),
        cmd_line,
        exit_code_of(status),
        stdout_path.to_path_buf(),
        stderr_path.to_path_buf(),
    ))
}

#[cfg(unix)]
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .unwrap_or_else(|| status.signal().map(|sig| -sig).unwrap_or(-1))
}

#[cfg(not(unix))]
fn exit_code_of(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
