//! 렌더링된 프로젝트 픽스처
//!
//! [`RenderedProject`]는 렌더링 + 의존성 동기화가 끝난 임시 디렉토리를 소유합니다.
//! drop 시 디렉토리가 삭제되며, [`RenderedProject::keep`]으로 보존할 수 있습니다.
//!
//! 렌더링이나 동기화 실패는 세션 전체에 치명적이므로 `Err`로 즉시 반환됩니다.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::info;

use scaffold_verify_core::error::{RenderError, VerifyError};
use scaffold_verify_core::params::TemplateParams;

use crate::engine::TemplateEngine;
use crate::plan::VerificationPlan;
use crate::runner::{CommandRunner, run_and_check};

/// 임시 디렉토리 이름 접두어
pub const FIXTURE_PREFIX: &str = "generated";

/// 렌더링된 프로젝트 인스턴스
#[derive(Debug)]
pub struct RenderedProject {
    dir: TempDir,
    params: TemplateParams,
}

impl RenderedProject {
    /// 렌더링 후 의존성을 동기화합니다.
    ///
    /// `parent`가 주어지면 그 아래에 임시 디렉토리를 만듭니다.
    pub fn create<E, R>(
        plan: &VerificationPlan,
        engine: &E,
        runner: &R,
        parent: Option<&Path>,
    ) -> Result<Self, VerifyError>
    where
        E: TemplateEngine + ?Sized,
        R: CommandRunner + ?Sized,
    {
        let project = Self::render(plan, engine, parent)?;
        project.sync_dependencies(plan, runner)?;
        Ok(project)
    }

    /// 렌더링만 수행합니다 (의존성 동기화 없음).
    pub fn render<E>(
        plan: &VerificationPlan,
        engine: &E,
        parent: Option<&Path>,
    ) -> Result<Self, VerifyError>
    where
        E: TemplateEngine + ?Sized,
    {
        let dir = temp_dir(parent)?;
        engine.render(&plan.render_request(dir.path()))?;
        info!(path = %dir.path().display(), "template rendered");
        Ok(Self {
            dir,
            params: plan.params.clone(),
        })
    }

    fn sync_dependencies<R>(&self, plan: &VerificationPlan, runner: &R) -> Result<(), VerifyError>
    where
        R: CommandRunner + ?Sized,
    {
        run_and_check(runner, "dependency sync", &plan.sync_command, self.path())?;
        info!(path = %self.path().display(), "dependencies synced");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// 렌더링에 사용된 파라미터
    pub fn params(&self) -> &TemplateParams {
        &self.params
    }

    /// 자동 삭제를 해제하고 경로를 반환합니다.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

fn temp_dir(parent: Option<&Path>) -> Result<TempDir, RenderError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(FIXTURE_PREFIX);
    let created = match parent {
        Some(parent) => std::fs::create_dir_all(parent).and_then(|()| builder.tempdir_in(parent)),
        None => builder.tempdir(),
    };
    created.map_err(|e| RenderError::Destination {
        path: parent
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| std::env::temp_dir().display().to_string()),
        reason: e.to_string(),
    })
}
