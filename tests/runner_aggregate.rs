//! Process execution and run aggregation against real binaries.

#![cfg(unix)]

use std::path::PathBuf;

use tempfile::TempDir;

use shellcheck_runner::checker::{
    Aggregate, Checker, Error, ResolutionStrategy, RunCounter, RunResult, SettingsBuilder,
};

fn settings_for(
    output: &TempDir,
    binary: &str,
    files: Vec<PathBuf>,
    files_per_run: i64,
    fail_on_warnings: bool,
) -> shellcheck_runner::checker::Settings {
    SettingsBuilder::new()
        .output_dir(output.path())
        .strategy(ResolutionStrategy::External)
        .external_binary(binary)
        .files(files)
        .files_per_run(files_per_run)
        .fail_on_warnings(fail_on_warnings)
        .build()
        .expect("settings")
}

#[tokio::test]
async fn an_empty_file_list_runs_once_and_succeeds() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(&output, "/bin/true", vec![], 0, true);

    let outcome = Checker::new(settings).check().await.expect("check");
    assert_eq!(outcome.total_runs, 1);
    assert_eq!(outcome.failed_runs, 0);

    let stdout = output
        .path()
        .join("shellcheck-runner")
        .join("shellcheck.default.0.stdout");
    let stderr = output
        .path()
        .join("shellcheck-runner")
        .join("shellcheck.default.0.stderr");
    assert_eq!(std::fs::read(&stdout).expect("stdout capture"), b"");
    assert_eq!(std::fs::read(&stderr).expect("stderr capture"), b"");
}

#[tokio::test]
async fn chunked_execution_runs_once_per_chunk() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(
        &output,
        "/bin/true",
        vec![PathBuf::from("a.sh"), PathBuf::from("b.sh")],
        1,
        true,
    );

    let outcome = Checker::new(settings).check().await.expect("check");
    assert_eq!(outcome.total_runs, 2);
    assert_eq!(outcome.failed_runs, 0);

    // deterministic, non-colliding capture names per run
    for run in 0..2 {
        let capture = output
            .path()
            .join("shellcheck-runner")
            .join(format!("shellcheck.default.{run}.stdout"));
        assert!(capture.is_file(), "{}", capture.display());
    }
}

#[tokio::test]
async fn failing_runs_fail_the_execution_when_policy_enabled() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(
        &output,
        "/bin/false",
        vec![PathBuf::from("a.sh")],
        10,
        true,
    );

    let err = Checker::new(settings)
        .check()
        .await
        .expect_err("fail-on-warnings must fail the execution");
    match err {
        Error::ChecksFailed { failed, total } => {
            assert_eq!(failed, 1);
            assert_eq!(total, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("[1]/[1]"));
}

#[tokio::test]
async fn failing_runs_are_tolerated_when_policy_disabled() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(
        &output,
        "/bin/false",
        vec![PathBuf::from("a.sh")],
        0,
        false,
    );

    let outcome = Checker::new(settings).check().await.expect("check");
    assert_eq!(outcome.total_runs, 1);
    assert_eq!(outcome.failed_runs, 1);
}

#[tokio::test]
async fn the_report_records_every_run() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(
        &output,
        "/bin/true",
        vec![PathBuf::from("a.sh"), PathBuf::from("b.sh")],
        1,
        false,
    );

    let outcome = Checker::new(settings).check().await.expect("check");
    let raw = std::fs::read_to_string(&outcome.report_path).expect("report file");
    let report: serde_json::Value = serde_json::from_str(&raw).expect("report json");

    assert_eq!(report["total_runs"], 2);
    assert_eq!(report["failed_runs"], 0);
    assert_eq!(report["strategy"], "external");
    assert_eq!(report["runs"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        report["binary_sha256"].as_str().map(str::len),
        Some(64),
        "hex sha256 expected"
    );
}

#[tokio::test]
async fn a_shared_counter_keeps_run_ids_disjoint_across_executions() {
    let output = TempDir::new().expect("tempdir");
    let counter = RunCounter::new();

    let first = settings_for(&output, "/bin/true", vec![PathBuf::from("a.sh")], 0, false);
    Checker::with_counter(first, counter.clone())
        .check()
        .await
        .expect("first execution");

    let second = settings_for(&output, "/bin/true", vec![PathBuf::from("b.sh")], 0, false);
    Checker::with_counter(second, counter.clone())
        .check()
        .await
        .expect("second execution");

    let dir = output.path().join("shellcheck-runner");
    assert!(dir.join("shellcheck.default.0.stdout").is_file());
    assert!(dir.join("shellcheck.default.1.stdout").is_file());
}

#[test]
fn run_counter_starts_where_asked_and_is_shared_between_clones() {
    let counter = RunCounter::starting_at(5);
    let clone = counter.clone();
    assert_eq!(counter.next(), 5);
    assert_eq!(clone.next(), 6);
    assert_eq!(counter.next(), 7);
}

#[test]
fn aggregate_partitions_failures_in_run_order() {
    let run = |id: &str, exit_code: i32| {
        RunResult::new(
            id.to_string(),
            vec!["shellcheck".to_string()],
            exit_code,
            PathBuf::from(format!("{id}.stdout")),
            PathBuf::from(format!("{id}.stderr")),
        )
    };
    let runs = vec![run("0", 0), run("1", 1), run("2", 0), run("3", 2)];

    let aggregate = Aggregate::over(&runs);
    assert_eq!(aggregate.total(), 4);
    let failed_ids: Vec<&str> = aggregate
        .failed_runs()
        .iter()
        .map(|r| r.run_id())
        .collect();
    assert_eq!(failed_ids, vec!["1", "3"]);

    assert!(aggregate.should_fail(true));
    assert!(!aggregate.should_fail(false));
}

#[test]
fn aggregate_of_clean_runs_never_fails() {
    let runs = vec![RunResult::new(
        "0".to_string(),
        vec!["shellcheck".to_string()],
        0,
        PathBuf::from("0.stdout"),
        PathBuf::from("0.stderr"),
    )];

    let aggregate = Aggregate::over(&runs);
    assert!(aggregate.failed_runs().is_empty());
    assert!(!aggregate.should_fail(true));
    assert!(!aggregate.should_fail(false));
}

#[tokio::test]
async fn a_missing_binary_is_a_resolution_failure_before_any_run() {
    let output = TempDir::new().expect("tempdir");
    let settings = settings_for(
        &output,
        "/definitely/not/a/binary",
        vec![PathBuf::from("a.sh")],
        0,
        false,
    );

    let err = Checker::new(settings)
        .check()
        .await
        .expect_err("missing binary must fail resolution");
    assert!(matches!(err, Error::Resolution { .. }), "{err}");

    // no captures were produced
    let dir = output.path().join("shellcheck-runner");
    let produced = std::fs::read_dir(&dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(produced, 0);
}
