//! Real-template verification suite.
//!
//! Renders the template at `$SCAFFOLD_VERIFY_TEMPLATE` once per test binary
//! with `copier`, syncs it with `uv`, and runs each generated-project check
//! as its own test, one at a time: every test shares the same rendered
//! tree, so they are `#[serial]`. Requires `copier`, `uv`, `uvx` and `git`
//! on `PATH`:
//!
//! ```text
//! SCAFFOLD_VERIFY_TEMPLATE=/path/to/template \
//!     cargo test -p scaffold-verify-harness --test template -- --ignored
//! ```

use std::path::Path;
use std::sync::OnceLock;

use serial_test::serial;

use scaffold_verify_core::config::ScaffoldConfig;
use scaffold_verify_harness::{
    CopierEngine, RenderedProject, STRUCTURE_CHECK, SystemRunner, VerificationPlan, Verifier,
};

const TEMPLATE_ENV: &str = "SCAFFOLD_VERIFY_TEMPLATE";

static PROJECT: OnceLock<Result<RenderedProject, String>> = OnceLock::new();

fn verifier() -> Verifier<CopierEngine<SystemRunner>, SystemRunner> {
    let mut config = ScaffoldConfig::default();
    config.template.src = std::env::var(TEMPLATE_ENV).unwrap_or_else(|_| {
        panic!("{TEMPLATE_ENV} must point at the template root")
    });
    let plan = VerificationPlan::from_config(&config).expect("default plan should build");

    // Statics are never dropped, so the fixture lives under the target dir.
    Verifier::new(
        plan,
        CopierEngine::new("copier", SystemRunner::new()),
        SystemRunner::for_generated_project(),
    )
        .workdir(Path::new(env!("CARGO_TARGET_TMPDIR")).join("template-fixture"))
}

/// Session-scoped rendered project; a fixture failure fails every test.
fn project() -> &'static RenderedProject {
    match PROJECT.get_or_init(|| verifier().prepare().map_err(|e| e.to_string())) {
        Ok(project) => project,
        Err(e) => panic!("fixture failed: {e}"),
    }
}

fn run_named_check(name: &str) {
    let project = project();
    let verifier = verifier();
    let check = verifier
        .plan()
        .checks
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("no check named {name}"));

    let result = scaffold_verify_harness::run_check(
        &SystemRunner::for_generated_project(),
        check,
        project.path(),
    );
    assert!(result.passed, "{}", result.message.unwrap_or_default());
}

#[test]
#[serial]
#[ignore = "needs copier, uv and git"]
fn template_renders() {
    let project = project();
    let verifier = verifier();
    let result = scaffold_verify_harness::structure_check(project.path(), &verifier.plan().expected);
    assert_eq!(result.name, STRUCTURE_CHECK);
    assert!(result.passed, "{}", result.message.unwrap_or_default());
}

#[test]
#[serial]
#[ignore = "needs copier, uv and git"]
fn generated_tests_pass() {
    run_named_check("generated-tests");
}

#[test]
#[serial]
#[ignore = "needs copier, uv and git"]
fn main_executes() {
    run_named_check("entry-point");
}

#[test]
#[serial]
#[ignore = "needs copier, uv and git"]
fn pre_commit_passes() {
    run_named_check("pre-commit");
}

#[test]
#[serial]
#[ignore = "needs copier, uv and git"]
fn renders_are_idempotent() {
    let result = verifier().check_idempotence();
    assert!(result.passed, "{}", result.message.unwrap_or_default());
}
