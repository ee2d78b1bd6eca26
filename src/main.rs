//! shellcheck_runner - chunked shellcheck execution for large script trees.
//!
//! This binary resolves a platform-appropriate shellcheck build, runs it
//! over the given shell files in bounded-size invocations, and reports an
//! aggregate pass/fail verdict.

use std::process;

use shellcheck_runner::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
