//! S1: Render -> sync -> structure -> checks on a healthy template.

use crate::helpers::config::*;
use crate::helpers::engine::*;

use scaffold_verify_core::params::TemplateParams;
use scaffold_verify_harness::{STRUCTURE_CHECK, SystemRunner, Verifier};

/// A complete skeleton passes every check.
#[test]
fn test_e2e_healthy_template_passes() {
    let workdir = tempfile::TempDir::new().expect("workdir");
    let verifier = Verifier::new(
        TestConfigBuilder::new().plan(),
        FakeEngine::python(),
        SystemRunner::new(),
    )
    .workdir(workdir.path());

    let session = verifier.run().expect("fixture should build");
    let report = &session.report;

    assert!(report.all_passed(), "report: {:#?}", report.checks);
    let names: Vec<_> = report.checks.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec![STRUCTURE_CHECK, "generated-tests", "entry-point"]);
    assert!(session.project.path().starts_with(workdir.path()));
}

/// The example scenario: "Test Project" -> `test_project` package layout.
#[test]
fn test_e2e_slug_drives_generated_layout() {
    let verifier = Verifier::new(
        TestConfigBuilder::new().plan(),
        FakeEngine::python(),
        SystemRunner::new(),
    );
    let session = verifier.run().expect("fixture should build");
    let root = session.project.path();

    assert!(root.join("src/test_project").is_dir());
    assert!(root.join("src/test_project/__init__.py").is_file());
    assert!(root.join("tests/test_test_project.py").is_file());
    assert_eq!(session.report.params.get("project_slug"), Some("test_project"));
}

/// A slug derived from the project name flows through paths and commands.
#[test]
fn test_e2e_derived_slug() {
    let params = TemplateParams::from_pairs([
        ("project_name", "Weather Station"),
        ("version", "2.0.0"),
        ("license", "Apache-2.0"),
    ]);
    let plan = TestConfigBuilder::new()
        .data(params)
        .check("module-name", "test -d src/weather_station")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");

    assert!(session.report.all_passed(), "report: {:#?}", session.report.checks);
}

/// Checks run inside the rendered project root.
#[test]
fn test_e2e_checks_run_in_project_root() {
    let plan = TestConfigBuilder::new()
        .no_checks()
        .check("cwd", "test -f pyproject.toml && test -f Makefile")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");

    assert!(session.report.all_passed(), "report: {:#?}", session.report.checks);
}

/// Sync runs before any check: its side effects are visible to checks.
#[test]
fn test_e2e_sync_precedes_checks() {
    let plan = TestConfigBuilder::new()
        .sync("mkdir .venv && touch .venv/synced")
        .check("venv", "test -f .venv/synced")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");

    assert!(session.report.check("venv").expect("venv check").passed);
}

/// Staging before the hook runner is visible to the hook command.
#[test]
fn test_e2e_prepare_then_hook() {
    let plan = TestConfigBuilder::new()
        .check_with_prepare("pre-commit", &["touch .staged"], "test -f .staged")
        .plan();
    let session = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect("fixture should build");

    assert!(session.report.check("pre-commit").expect("hook check").passed);
}

/// The report serializes to JSON with one entry per check.
#[test]
fn test_e2e_report_json_shape() {
    let session = Verifier::new(
        TestConfigBuilder::new().plan(),
        FakeEngine::python(),
        SystemRunner::new(),
    )
    .run()
    .expect("fixture should build");

    let json = serde_json::to_value(&session.report).expect("serialize report");
    assert_eq!(json["checks"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["params"]["license"], "MIT");
    assert!(json["project_dir"].as_str().is_some());
}

/// Dropping the session removes the rendered project.
#[test]
fn test_e2e_session_cleanup() {
    let session = Verifier::new(
        TestConfigBuilder::new().plan(),
        FakeEngine::python(),
        SystemRunner::new(),
    )
    .run()
    .expect("fixture should build");
    let path = session.project.path().to_path_buf();
    assert!(path.exists());

    drop(session);
    assert!(!path.exists(), "rendered project should be removed on drop");
}
