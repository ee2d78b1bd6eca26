//! Command line interface for the shellcheck runner.
//!
//! Parses and validates arguments, maps them onto checker [`Settings`], and
//! runs one execution, translating the outcome into an exit code.

mod args;

pub use args::Args;

use std::collections::HashMap;
use std::str::FromStr;

use url::Url;

use crate::checker::{Checker, Error, ResolutionStrategy, Settings, SettingsBuilder};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    if args.skip {
        log::info!("skipping shellcheck execution");
        return Ok(0);
    }

    let settings = build_settings(&args)?;
    match Checker::new(settings).check().await {
        Ok(outcome) => {
            log::info!(
                "shellcheck finished: [{}] runs, [{}] with findings, report at [{}]",
                outcome.total_runs,
                outcome.failed_runs,
                outcome.report_path.display()
            );
            Ok(0)
        }
        Err(e @ Error::ChecksFailed { .. }) => {
            eprintln!("{e}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

/// Maps validated CLI arguments onto checker settings.
fn build_settings(args: &Args) -> Result<Settings> {
    let strategy = ResolutionStrategy::from_str(&args.strategy)
        .map_err(|e| CliError::InvalidArguments {
            reason: e.to_string(),
        })?;

    let mut overrides = HashMap::new();
    for entry in &args.url_overrides {
        // validate() already guaranteed the separator
        let (key, raw_url) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        let url = Url::parse(raw_url).map_err(|e| CliError::InvalidArguments {
            reason: format!("invalid --url-override url [{raw_url}]: {e}"),
        })?;
        overrides.insert(key.to_string(), url);
    }

    let mut builder = SettingsBuilder::new()
        .files(args.files.clone())
        .tool_args(args.tool_args.clone())
        .files_per_run(args.files_per_run)
        .fail_on_warnings(args.fail_on_warnings)
        .strategy(strategy)
        .url_overrides(overrides)
        .output_dir(&args.output_dir)
        .execution_id(&args.execution_id);

    if let Some(path) = &args.external_binary {
        builder = builder.external_binary(path);
    }
    if let Some(root) = &args.resource_root {
        builder = builder.resource_root(root);
    }

    Ok(builder.build()?)
}
