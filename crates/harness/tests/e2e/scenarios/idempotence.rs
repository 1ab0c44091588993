//! S4: Rendering the same parameters twice yields identical trees.

use crate::helpers::config::*;
use crate::helpers::engine::*;

use scaffold_verify_harness::{IDEMPOTENCE_CHECK, SystemRunner, TreeSnapshot, Verifier};

/// Deterministic template -> idempotence check passes.
#[test]
fn test_e2e_deterministic_template_is_idempotent() {
    let verifier = Verifier::new(
        TestConfigBuilder::new().no_checks().plan(),
        FakeEngine::python(),
        SystemRunner::new(),
    );
    let result = verifier.check_idempotence();
    assert!(result.passed, "{:?}", result.message);
}

/// Non-deterministic template -> idempotence check lists the differences.
#[test]
fn test_e2e_unstable_template_is_reported() {
    let verifier = Verifier::new(
        TestConfigBuilder::new().no_checks().plan(),
        FakeEngine::python().unstable(),
        SystemRunner::new(),
    );
    let result = verifier.check_idempotence();
    assert!(!result.passed);
    let msg = result.message.expect("diff message");
    assert!(msg.contains("build-1.log (file)"));
    assert!(msg.contains("build-2.log (file)"));
}

/// Enabled in the plan -> idempotence appears as the last report entry.
#[test]
fn test_e2e_idempotence_in_report() {
    let engine = FakeEngine::python();
    let verifier = Verifier::new(
        TestConfigBuilder::new().idempotence(true).plan(),
        &engine,
        SystemRunner::new(),
    );
    let session = verifier.run().expect("fixture should build");

    let last = session.report.checks.last().expect("at least one check");
    assert_eq!(last.name, IDEMPOTENCE_CHECK);
    assert!(last.passed);
    // fixture render + two comparison renders
    assert_eq!(engine.renders(), 3);
}

/// Two fixtures from the same plan have identical snapshots.
#[test]
fn test_e2e_two_fixtures_share_structure() {
    let verifier = Verifier::new(
        TestConfigBuilder::new().no_checks().plan(),
        FakeEngine::python().with("docs/index.md", "# {project_name}"),
        SystemRunner::new(),
    );
    let first = verifier.prepare().expect("first fixture");
    let second = verifier.prepare().expect("second fixture");

    let a = TreeSnapshot::capture(first.path()).expect("snapshot");
    let b = TreeSnapshot::capture(second.path()).expect("snapshot");
    assert!(a.diff(&b).is_empty());
    assert_ne!(first.path(), second.path());
}
