//! S3: A failing check is reported without affecting its siblings.

use crate::helpers::config::*;
use crate::helpers::engine::*;

use scaffold_verify_harness::{STRUCTURE_CHECK, SystemRunner, Verifier};

/// Missing file -> structure check fails, command checks still run.
#[test]
fn test_e2e_missing_file_fails_structure_only() {
    let engine = FakeEngine::python().without("LICENSE");
    let session = Verifier::new(TestConfigBuilder::new().plan(), engine, SystemRunner::new())
        .run()
        .expect("fixture should build");
    let report = &session.report;

    let structure = report.check(STRUCTURE_CHECK).expect("structure check");
    assert!(!structure.passed);
    assert!(
        structure
            .message
            .as_deref()
            .unwrap_or_default()
            .contains("LICENSE (file)")
    );
    assert!(report.check("generated-tests").expect("tests check").passed);
    assert!(report.check("entry-point").expect("entry check").passed);
    assert_eq!(report.failed_count(), 1);
}

/// A failing command embeds captured stdout and stderr; later checks run.
#[test]
fn test_e2e_failing_check_reports_output() {
    let plan = TestConfigBuilder::new()
        .no_checks()
        .check("pytest", "echo '1 failed, 2 passed'; echo 'E   assert 1 == 2' >&2; exit 1")
        .check("after", "touch after-ran")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");
    let report = &session.report;

    let failed = report.check("pytest").expect("pytest check");
    assert!(!failed.passed);
    let msg = failed.message.as_deref().expect("failure message");
    assert!(msg.starts_with("pytest failed:"));
    assert!(msg.contains("stdout: 1 failed, 2 passed"));
    assert!(msg.contains("stderr: E   assert 1 == 2"));

    assert!(report.check("after").expect("after check").passed);
    assert!(session.project.path().join("after-ran").exists());
}

/// Failed preparation fails only its own check.
#[test]
fn test_e2e_failed_staging_is_local() {
    let plan = TestConfigBuilder::new()
        .check_with_prepare(
            "pre-commit",
            &["echo 'fatal: not a git repository' >&2; exit 128"],
            "true",
        )
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");
    let report = &session.report;

    let hook = report.check("pre-commit").expect("hook check");
    assert!(!hook.passed);
    assert!(
        hook.message
            .as_deref()
            .unwrap_or_default()
            .contains("not a git repository")
    );
    assert!(report.check("generated-tests").expect("tests check").passed);
}

/// Each command runs exactly once; no retries.
#[test]
fn test_e2e_commands_run_once() {
    let plan = TestConfigBuilder::new()
        .sync("echo x >> .sync-count")
        .no_checks()
        .check("count", "echo x >> .check-count; exit 1")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");
    let root = session.project.path();

    let sync_runs = std::fs::read_to_string(root.join(".sync-count")).expect("sync count");
    let check_runs = std::fs::read_to_string(root.join(".check-count")).expect("check count");
    assert_eq!(sync_runs.lines().count(), 1);
    assert_eq!(check_runs.lines().count(), 1);
}
