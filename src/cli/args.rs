//! Command line argument parsing and validation.

use std::path::PathBuf;

use clap::Parser;

/// Chunked shellcheck runner with pluggable binary resolution
#[derive(Parser, Debug)]
#[command(
    name = "shellcheck_runner",
    version,
    about = "Runs shellcheck over a list of shell files, resolving the binary as needed",
    long_about = "Resolves a platform-appropriate shellcheck binary (external path, release \
download, or bundled resource), then runs it over the given shell files, splitting oversized \
file lists into multiple invocations.

Usage:
  shellcheck_runner scripts/*.sh --strategy download --fail-on-warnings
  shellcheck_runner scripts/*.sh --strategy external --external-binary /usr/bin/shellcheck
  shellcheck_runner big/**/*.sh --files-per-run 500 --arg --severity=warning

Exit code 0 = every shellcheck run exited 0, or warnings were not configured to fail."
)]
pub struct Args {
    /// Shell files to check, in invocation order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Binary resolution strategy: external, download, embedded
    #[arg(long, value_name = "STRATEGY", default_value = "download")]
    pub strategy: String,

    /// Path (or bare PATH-resolved name) of an external shellcheck binary,
    /// used only with --strategy external
    #[arg(long, value_name = "PATH")]
    pub external_binary: Option<PathBuf>,

    /// Release-archive URL override as KEY=URL, where KEY is a platform key
    /// such as linux-x86_64 (repeatable)
    #[arg(long = "url-override", value_name = "KEY=URL")]
    pub url_overrides: Vec<String>,

    /// Extra argument passed to every shellcheck invocation (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Max files per shellcheck invocation; values <= 0 mean unbounded
    #[arg(
        long,
        value_name = "N",
        default_value_t = 0,
        allow_hyphen_values = true
    )]
    pub files_per_run: i64,

    /// Fail the overall execution if any run exits non-zero
    #[arg(long)]
    pub fail_on_warnings: bool,

    /// Directory for the resolved binary, captured output and report
    #[arg(short = 'o', long, value_name = "DIR", default_value = "target")]
    pub output_dir: PathBuf,

    /// Label distinguishing multiple configured executions
    #[arg(long, value_name = "LABEL", default_value = "default")]
    pub execution_id: String,

    /// Root directory of bundled shellcheck resources,
    /// used only with --strategy embedded
    #[arg(long, value_name = "DIR")]
    pub resource_root: Option<PathBuf>,

    /// Skip execution entirely
    #[arg(long)]
    pub skip: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let valid_strategies = ["external", "download", "embedded"];
        if !valid_strategies.contains(&self.strategy.as_str()) {
            return Err(format!(
                "Invalid strategy: {}. Valid strategies: {}",
                self.strategy,
                valid_strategies.join(", ")
            ));
        }

        if self.strategy == "external" && self.external_binary.is_none() {
            return Err("--strategy external requires --external-binary".to_string());
        }

        for entry in &self.url_overrides {
            if !entry.contains('=') {
                return Err(format!(
                    "Invalid --url-override [{entry}]: expected KEY=URL"
                ));
            }
        }

        Ok(())
    }
}
