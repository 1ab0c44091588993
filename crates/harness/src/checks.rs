//! 픽스처 위에서 실행되는 개별 검사
//!
//! 각 검사는 독립적입니다. 실패는 [`CheckResult`]로 기록될 뿐 다른 검사를 막지 않습니다.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use scaffold_verify_core::types::{CheckResult, ExpectedPath};

use crate::plan::CheckPlan;
use crate::runner::{CommandRunner, run_and_check};
use crate::structure::assert_structure;

/// 구조 검사 결과 이름
pub const STRUCTURE_CHECK: &str = "structure";

/// 구조 검사를 실행합니다.
pub fn structure_check(project_dir: &Path, expected: &[ExpectedPath]) -> CheckResult {
    let started = Instant::now();
    match assert_structure(project_dir, expected) {
        Ok(()) => CheckResult::passed(STRUCTURE_CHECK, started.elapsed()),
        Err(e) => {
            warn!(error = %e, "structure check failed");
            CheckResult::failed(STRUCTURE_CHECK, e.to_string(), started.elapsed())
        }
    }
}

/// 명령 검사를 실행합니다.
///
/// 준비 명령을 순서대로 실행한 뒤 본 명령을 실행합니다.
/// 어느 단계든 실패하면 캡처된 출력과 함께 실패 결과를 반환합니다.
pub fn run_check<R>(runner: &R, check: &CheckPlan, project_dir: &Path) -> CheckResult
where
    R: CommandRunner + ?Sized,
{
    let started = Instant::now();
    info!(check = check.name.as_str(), "running check");

    for step in &check.prepare {
        let label = format!("{} (prepare: {})", check.label, step.join(" "));
        if let Err(e) = run_and_check(runner, &label, step, project_dir) {
            warn!(check = check.name.as_str(), error = %e, "check preparation failed");
            return CheckResult::failed(&check.name, e.to_string(), started.elapsed());
        }
    }

    match run_and_check(runner, &check.label, &check.command, project_dir) {
        Ok(_) => CheckResult::passed(&check.name, started.elapsed()),
        Err(e) => {
            warn!(check = check.name.as_str(), "check failed");
            CheckResult::failed(&check.name, e.to_string(), started.elapsed())
        }
    }
}
