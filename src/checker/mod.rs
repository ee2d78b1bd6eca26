//! Binary resolution and chunked invocation of the shellcheck tool.
//!
//! The checker:
//! 1. Detects the host platform ([`PlatformVariant`])
//! 2. Resolves a usable shellcheck binary ([`BinaryResolver`])
//! 3. Splits the file list into bounded invocations ([`chunks`])
//! 4. Runs the binary once per chunk, capturing output ([`runner::run`])
//! 5. Aggregates exit codes into a verdict ([`Aggregate`])
//!
//! # Module Organization
//!
//! - [`platform`] - os/arch detection and per-platform data
//! - [`resolver`] - the three binary resolution strategies
//! - [`chunk`] - bounded-size splitting of the file list
//! - [`runner`] - child-process execution with output capture
//! - [`aggregate`] - failure partition and overall verdict
//! - [`orchestrator`] - the [`Checker`] driving one whole execution
//! - [`report`] - JSON execution report
//! - [`checksum`] - SHA-256 of the resolved binary
//! - [`paths`] - output-directory layout
//! - [`settings`] - execution configuration and its builder

pub mod aggregate;
pub mod checksum;
pub mod chunk;
pub mod error;
pub mod orchestrator;
pub mod paths;
pub mod platform;
pub mod report;
pub mod resolver;
pub mod runner;
pub mod settings;

pub use aggregate::Aggregate;
pub use chunk::{chunks, Chunks};
pub use error::{Error, Result};
pub use orchestrator::{CheckOutcome, Checker};
pub use paths::RunnerPaths;
pub use platform::{host_platform_key, platform_key, PlatformVariant, SHELLCHECK_VERSION};
pub use report::CheckReport;
pub use resolver::{
    ArchiveFetcher, BinaryHandle, BinaryResolver, HttpArchiveFetcher, ResolutionStrategy,
};
pub use runner::{RunCounter, RunResult};
pub use settings::{Settings, SettingsBuilder};
