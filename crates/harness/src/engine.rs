//! 템플릿 엔진 추상화
//!
//! 렌더링은 외부 도구가 담당합니다. [`TemplateEngine`] trait 은 그 경계를 정의하고,
//! [`CopierEngine`]은 `copier copy` 프로세스를 실행하는 구현입니다.
//!
//! ```text
//! VerificationPlan ──▶ RenderRequest ──▶ TemplateEngine::render
//!                                            │
//!                                            ▼
//!                              copier copy --defaults --trust
//!                                   --vcs-ref HEAD --data k=v ... SRC DST
//! ```

use std::path::PathBuf;

use tracing::info;

use scaffold_verify_core::error::RenderError;
use scaffold_verify_core::params::TemplateParams;

use crate::runner::{CommandRunner, run_and_check};

/// 렌더링 요청 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// 템플릿 루트
    pub src: PathBuf,
    /// 결과 디렉토리
    pub dst: PathBuf,
    pub data: TemplateParams,
    /// 질문에 기본값 사용 (비대화형)
    pub defaults: bool,
    /// 템플릿 태스크 등 임의 코드 실행 허용
    pub trust: bool,
    pub vcs_ref: Option<String>,
}

/// 템플릿 렌더링 trait
pub trait TemplateEngine {
    /// `request.dst`를 완전한 프로젝트 트리로 채웁니다.
    fn render(&self, request: &RenderRequest) -> Result<(), RenderError>;
}

impl<E: TemplateEngine + ?Sized> TemplateEngine for &E {
    fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        (**self).render(request)
    }
}

/// `copier` CLI 를 실행하는 엔진
#[derive(Debug, Clone)]
pub struct CopierEngine<R> {
    program: String,
    runner: R,
}

impl<R: CommandRunner> CopierEngine<R> {
    pub fn new(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// 요청에 해당하는 전체 명령 벡터
    pub fn command(&self, request: &RenderRequest) -> Vec<String> {
        let mut argv = vec![self.program.clone(), "copy".to_owned()];
        if request.defaults {
            argv.push("--defaults".to_owned());
        }
        if request.trust {
            argv.push("--trust".to_owned());
        }
        if let Some(r) = &request.vcs_ref {
            argv.push("--vcs-ref".to_owned());
            argv.push(r.clone());
        }
        for (key, value) in request.data.iter() {
            argv.push("--data".to_owned());
            argv.push(format!("{key}={value}"));
        }
        argv.push(request.src.display().to_string());
        argv.push(request.dst.display().to_string());
        argv
    }
}

impl<R: CommandRunner> TemplateEngine for CopierEngine<R> {
    fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let src = request
            .src
            .canonicalize()
            .map_err(|_| RenderError::TemplateNotFound {
                path: request.src.display().to_string(),
            })?;
        let destination = |e: std::io::Error| RenderError::Destination {
            path: request.dst.display().to_string(),
            reason: e.to_string(),
        };
        std::fs::create_dir_all(&request.dst).map_err(destination)?;
        let dst = request.dst.canonicalize().map_err(destination)?;

        info!(
            src = %src.display(),
            dst = %dst.display(),
            vcs_ref = request.vcs_ref.as_deref().unwrap_or("-"),
            "rendering template"
        );

        // 엔진은 템플릿 루트에서 실행되므로 상대 경로를 미리 해석해 둔다
        let resolved = RenderRequest {
            src,
            dst,
            ..request.clone()
        };
        run_and_check(&self.runner, "copier", &self.command(&resolved), &resolved.src)?;
        Ok(())
    }
}
