//! S2: Render or sync failure aborts the session before any check runs.

use std::path::PathBuf;

use crate::helpers::config::*;
use crate::helpers::engine::*;

use scaffold_verify_core::error::{ProcessError, RenderError, VerifyError};
use scaffold_verify_harness::{CopierEngine, SystemRunner, Verifier};

/// Sync exits non-zero -> fatal process error with captured output.
#[test]
fn test_e2e_sync_failure_is_fatal() {
    let plan = TestConfigBuilder::new()
        .sync("echo resolving >&1; echo 'No solution found' >&2; exit 1")
        .check("never", "touch ran")
        .plan();
    let err = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect_err("sync failure should abort");

    match err {
        VerifyError::Process(ProcessError::Failed { label, stderr, .. }) => {
            assert_eq!(label, "dependency sync");
            assert!(stderr.contains("No solution found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Missing dependency manager -> spawn error, still fatal.
#[test]
fn test_e2e_missing_sync_tool_is_fatal() {
    let mut config = TestConfigBuilder::new().build();
    config.sync.command = vec!["scaffold-verify-no-such-package-manager".to_owned()];
    let plan = scaffold_verify_harness::VerificationPlan::from_config(&config).expect("plan");

    let err = Verifier::new(plan, FakeEngine::python(), SystemRunner::new())
        .run()
        .expect_err("missing tool should abort");
    assert!(matches!(err, VerifyError::Process(ProcessError::Spawn { .. })));
}

/// Template root does not exist -> render error, engine never spawned.
#[test]
fn test_e2e_missing_template_root_is_fatal() {
    let mut plan = TestConfigBuilder::new().plan();
    plan.template_src = PathBuf::from("/nonexistent/scaffold-verify/template");

    let engine = CopierEngine::new("copier", SystemRunner::new());
    let err = Verifier::new(plan, engine, SystemRunner::new())
        .run()
        .expect_err("missing template should abort");
    assert!(matches!(
        err,
        VerifyError::Render(RenderError::TemplateNotFound { .. })
    ));
}

/// Engine process fails -> render error embeds the engine output.
#[test]
fn test_e2e_engine_failure_is_fatal() {
    let template = tempfile::TempDir::new().expect("template dir");
    let mut plan = TestConfigBuilder::new().plan();
    plan.template_src = template.path().to_path_buf();

    // `false` ignores its arguments and exits 1, standing in for a failing copier.
    let engine = CopierEngine::new("false", SystemRunner::new());
    let err = Verifier::new(plan, engine, SystemRunner::new())
        .run()
        .expect_err("engine failure should abort");
    assert!(matches!(
        err,
        VerifyError::Render(RenderError::Engine(ProcessError::Failed { .. }))
    ));
    assert!(err.to_string().contains("copier failed"));
}
