//! Aggregation of run results into an overall verdict.

use super::runner::RunResult;

/// Derived view over a batch of run results.
///
/// Partitions out the runs with non-zero exit codes (original order kept)
/// and answers the single policy question: should the overall execution be
/// treated as failed?
pub struct Aggregate<'a> {
    runs: &'a [RunResult],
    failed: Vec<&'a RunResult>,
}

impl<'a> Aggregate<'a> {
    /// Builds the aggregate over a finished batch.
    pub fn over(runs: &'a [RunResult]) -> Self {
        let failed = runs.iter().filter(|run| run.is_not_ok()).collect();
        Self { runs, failed }
    }

    /// Total number of runs in the batch.
    pub fn total(&self) -> usize {
        self.runs.len()
    }

    /// The runs with non-zero exit codes, in run order.
    pub fn failed_runs(&self) -> &[&'a RunResult] {
        &self.failed
    }

    /// The overall verdict: failed runs exist and the policy says they
    /// count.
    pub fn should_fail(&self, fail_on_warnings: bool) -> bool {
        !self.failed.is_empty() && fail_on_warnings
    }
}
