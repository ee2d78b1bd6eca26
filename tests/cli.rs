//! End-to-end CLI behavior via the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn runner() -> Command {
    Command::cargo_bin("shellcheck_runner").expect("binary built")
}

#[test]
fn rejects_an_unknown_strategy() {
    runner()
        .args(["--strategy", "telepathy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid strategy: telepathy"));
}

#[test]
fn external_strategy_requires_a_binary_path() {
    runner()
        .args(["--strategy", "external"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires --external-binary"));
}

#[test]
fn rejects_a_malformed_url_override() {
    runner()
        .args(["--url-override", "linux-x86_64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=URL"));
}

#[test]
fn skip_short_circuits_the_execution() {
    runner().arg("--skip").assert().success();
}

#[cfg(unix)]
#[test]
fn a_clean_run_exits_zero_and_writes_the_report() {
    let output = tempfile::TempDir::new().expect("tempdir");

    runner()
        .args(["--strategy", "external", "--external-binary", "/bin/true"])
        .args(["--output-dir"])
        .arg(output.path())
        .args(["--execution-id", "ci"])
        .arg("a.sh")
        .assert()
        .success();

    let report = output
        .path()
        .join("shellcheck-runner")
        .join("shellcheck.ci.report.json");
    assert!(report.is_file(), "{}", report.display());
}

#[cfg(unix)]
#[test]
fn warnings_fail_the_run_only_when_asked() {
    let output = tempfile::TempDir::new().expect("tempdir");

    // tolerated by default
    runner()
        .args(["--strategy", "external", "--external-binary", "/bin/false"])
        .args(["--output-dir"])
        .arg(output.path())
        .arg("a.sh")
        .assert()
        .success();

    // fatal with the policy enabled
    runner()
        .args(["--strategy", "external", "--external-binary", "/bin/false"])
        .args(["--output-dir"])
        .arg(output.path())
        .args(["--execution-id", "strict"])
        .arg("--fail-on-warnings")
        .arg("a.sh")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[1]/[1] runs had non-zero exit codes"));
}

#[cfg(unix)]
#[test]
fn a_missing_external_binary_reports_a_resolution_error() {
    let output = tempfile::TempDir::new().expect("tempdir");

    runner()
        .args([
            "--strategy",
            "external",
            "--external-binary",
            "/definitely/not/a/binary",
        ])
        .args(["--output-dir"])
        .arg(output.path())
        .arg("a.sh")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("external shellcheck binary"));
}
