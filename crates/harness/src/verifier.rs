//! 검증 오케스트레이션
//!
//! 실행 순서: 렌더링 → 의존성 동기화 → 구조 검사 → 명령 검사들 → (선택) 멱등성 검사
//!
//! 렌더링/동기화 실패만 `Err`로 반환됩니다. 그 이후의 실패는 모두
//! [`VerificationReport`]의 개별 [`CheckResult`]에 기록됩니다.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use scaffold_verify_core::error::VerifyError;
use scaffold_verify_core::types::{CheckResult, VerificationReport};

use crate::checks::{run_check, structure_check};
use crate::engine::TemplateEngine;
use crate::fixture::RenderedProject;
use crate::plan::VerificationPlan;
use crate::runner::CommandRunner;
use crate::snapshot::TreeSnapshot;

/// 멱등성 검사 결과 이름
pub const IDEMPOTENCE_CHECK: &str = "idempotence";

/// 한 번의 검증 세션 결과
///
/// 리포트를 출력하는 동안 프로젝트 디렉토리를 살려 두기 위해 둘을 함께 반환합니다.
#[derive(Debug)]
pub struct VerificationSession {
    pub project: RenderedProject,
    pub report: VerificationReport,
}

/// 검증 실행기
pub struct Verifier<E, R> {
    plan: VerificationPlan,
    engine: E,
    runner: R,
    workdir: Option<PathBuf>,
}

impl<E, R> Verifier<E, R>
where
    E: TemplateEngine,
    R: CommandRunner,
{
    pub fn new(plan: VerificationPlan, engine: E, runner: R) -> Self {
        Self {
            plan,
            engine,
            runner,
            workdir: None,
        }
    }

    /// 임시 디렉토리를 만들 상위 디렉토리
    pub fn workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn plan(&self) -> &VerificationPlan {
        &self.plan
    }

    /// 픽스처를 만들고 모든 검사를 실행합니다.
    pub fn run(&self) -> Result<VerificationSession, VerifyError> {
        let project = self.prepare()?;
        let report = self.check(project.path());
        Ok(VerificationSession { project, report })
    }

    /// 렌더링 + 의존성 동기화만 수행합니다.
    pub fn prepare(&self) -> Result<RenderedProject, VerifyError> {
        RenderedProject::create(
            &self.plan,
            &self.engine,
            &self.runner,
            self.workdir.as_deref(),
        )
    }

    /// 이미 준비된 프로젝트에 대해 검사들을 실행합니다.
    pub fn check(&self, project_dir: &Path) -> VerificationReport {
        let mut checks = Vec::with_capacity(self.plan.checks.len() + 2);

        checks.push(structure_check(project_dir, &self.plan.expected));

        for check in &self.plan.checks {
            checks.push(run_check(&self.runner, check, project_dir));
        }

        if self.plan.idempotence {
            checks.push(self.check_idempotence());
        }

        let report = VerificationReport {
            template: self.plan.template_src.display().to_string(),
            project_dir: project_dir.display().to_string(),
            params: self.plan.params.clone(),
            checks,
        };

        info!(
            total = report.checks.len(),
            failed = report.failed_count(),
            "verification finished"
        );
        report
    }

    /// 같은 파라미터로 두 번 렌더링하여 트리 구조를 비교합니다.
    ///
    /// 의존성 동기화는 하지 않습니다. 렌더링 실패도 이 검사의 실패로 기록됩니다.
    pub fn check_idempotence(&self) -> CheckResult {
        let started = Instant::now();
        match self.compare_renders() {
            Ok(None) => CheckResult::passed(IDEMPOTENCE_CHECK, started.elapsed()),
            Ok(Some(message)) | Err(message) => {
                warn!(message = message.as_str(), "idempotence check failed");
                CheckResult::failed(IDEMPOTENCE_CHECK, message, started.elapsed())
            }
        }
    }

    fn compare_renders(&self) -> Result<Option<String>, String> {
        let workdir = self.workdir.as_deref();
        let first = RenderedProject::render(&self.plan, &self.engine, workdir)
            .map_err(|e| format!("first render failed: {e}"))?;
        let second = RenderedProject::render(&self.plan, &self.engine, workdir)
            .map_err(|e| format!("second render failed: {e}"))?;

        let left = TreeSnapshot::capture(first.path()).map_err(|e| e.to_string())?;
        let right = TreeSnapshot::capture(second.path()).map_err(|e| e.to_string())?;
        let diff = left.diff(&right);

        if diff.is_empty() {
            Ok(None)
        } else {
            Ok(Some(format!(
                "renders differ:\nonly in first: {}\nonly in second: {}",
                diff.only_left.join(", "),
                diff.only_right.join(", ")
            )))
        }
    }
}
