//! 검증 계획: 설정을 파라미터로 치환한 실행 가능한 형태
//!
//! [`VerificationPlan`]은 [`ScaffoldConfig`]의 모든 `{name}` 플레이스홀더를
//! 미리 치환해 둔 것입니다. 치환 에러는 렌더링을 시작하기 전에 드러납니다.

use std::path::PathBuf;

use scaffold_verify_core::config::ScaffoldConfig;
use scaffold_verify_core::error::VerifyError;
use scaffold_verify_core::params::TemplateParams;
use scaffold_verify_core::types::ExpectedPath;

use crate::engine::RenderRequest;

/// 치환이 끝난 명령 검사
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPlan {
    pub name: String,
    pub label: String,
    pub command: Vec<String>,
    pub prepare: Vec<Vec<String>>,
}

/// 한 세션의 실행 계획
#[derive(Debug, Clone)]
pub struct VerificationPlan {
    pub template_src: PathBuf,
    pub vcs_ref: Option<String>,
    pub defaults: bool,
    pub trust: bool,
    /// slug 가 채워진 파라미터
    pub params: TemplateParams,
    pub sync_command: Vec<String>,
    pub expected: Vec<ExpectedPath>,
    pub checks: Vec<CheckPlan>,
    pub idempotence: bool,
}

impl VerificationPlan {
    pub fn from_config(config: &ScaffoldConfig) -> Result<Self, VerifyError> {
        let params = config.template.data.clone().normalize()?;

        let expected = config
            .structure
            .expected
            .iter()
            .map(|e| -> Result<ExpectedPath, VerifyError> {
                Ok(ExpectedPath {
                    path: params.interpolate(&e.path)?,
                    kind: e.kind,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let checks = config
            .checks
            .iter()
            .map(|c| -> Result<CheckPlan, VerifyError> {
                Ok(CheckPlan {
                    name: c.name.clone(),
                    label: c.label().to_owned(),
                    command: params.interpolate_all(&c.command)?,
                    prepare: c
                        .prepare
                        .iter()
                        .map(|p| params.interpolate_all(p))
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            template_src: PathBuf::from(&config.template.src),
            vcs_ref: config.template.vcs_ref().map(str::to_owned),
            defaults: config.template.defaults,
            trust: config.template.trust,
            sync_command: params.interpolate_all(&config.sync.command)?,
            params,
            expected,
            checks,
            idempotence: config.template.idempotence,
        })
    }

    /// `dst`로 렌더링하는 요청
    pub fn render_request(&self, dst: impl Into<PathBuf>) -> RenderRequest {
        RenderRequest {
            src: self.template_src.clone(),
            dst: dst.into(),
            data: self.params.clone(),
            defaults: self.defaults,
            trust: self.trust,
            vcs_ref: self.vcs_ref.clone(),
        }
    }
}
