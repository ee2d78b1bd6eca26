//! Error types for binary resolution and check execution.
//!
//! Non-zero exit codes from the checked tool are deliberately *not* errors:
//! they are collected into the run results and only become a single
//! [`Error::ChecksFailed`] at the end of the batch when the fail-on-warnings
//! policy asks for it.

use std::path::Path;

use thiserror::Error;

use super::resolver::ResolutionStrategy;

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for checker operations
#[derive(Error, Debug)]
pub enum Error {
    /// The host os/arch pair has no supported shellcheck build.
    ///
    /// Carries the raw identifier strings so the user can see exactly what
    /// was detected.
    #[error("no shellcheck binary available for os [{os}] arch [{arch}]")]
    UnsupportedPlatform {
        /// Raw OS name as detected
        os: String,
        /// Raw CPU architecture as detected
        arch: String,
    },

    /// The chosen resolution strategy could not produce a usable binary.
    #[error("the {strategy} shellcheck binary could not be resolved: {reason}")]
    Resolution {
        /// Strategy that was attempted
        strategy: ResolutionStrategy,
        /// Reason for the failure
        reason: String,
    },

    /// The operating system refused to start the child process.
    #[error("failed to launch [{command}]: {error}")]
    CommandFailed {
        /// Command line that failed to launch
        command: String,
        /// Underlying launch error
        #[source]
        error: std::io::Error,
    },

    /// Ctrl-C arrived while waiting on a child process.
    #[error("interrupted while waiting for shellcheck run [{run_id}]")]
    Interrupted {
        /// Run that was being awaited
        run_id: String,
    },

    /// Batched end-of-run verdict when fail-on-warnings is enabled.
    #[error("there are shellcheck problems: [{failed}]/[{total}] runs had non-zero exit codes")]
    ChecksFailed {
        /// Number of runs with non-zero exit codes
        failed: usize,
        /// Total number of runs performed
        total: usize,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP download errors
    #[error("download error: {0}")]
    Http(#[from] reqwest::Error),

    /// ZIP archive errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Early-return with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::checker::error::Error::GenericError(format!($($arg)*)))
    };
}

/// Extension trait attaching filesystem context to raw IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the attempted operation and the path involved.
    fn fs_context(self, operation: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, operation: &str, path: &Path) -> Result<T> {
        self.map_err(|e| {
            Error::GenericError(format!("{} [{}]: {}", operation, path.display(), e))
        })
    }
}

/// Extension trait attaching a message to an already-typed checker error.
pub trait Context<T> {
    /// Prefixes the error with a higher-level description of what was
    /// being attempted.
    fn context(self, msg: impl Into<String>) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", msg.into(), e)))
    }
}
