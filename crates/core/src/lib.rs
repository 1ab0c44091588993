//! scaffold-verify 공통 크레이트
//!
//! 템플릿 파라미터, 설정, 에러, 리포트 타입을 정의합니다.
//! 외부 프로세스 실행과 렌더링 오케스트레이션은 `scaffold-verify-harness`가 담당합니다.

pub mod config;
pub mod error;
pub mod params;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{
    ConfigError, ParamError, ProcessError, RenderError, StructureError, VerifyError,
};

// 설정
pub use config::{CheckConfig, ScaffoldConfig};

// 파라미터
pub use params::TemplateParams;

// 도메인 타입
pub use types::{CheckResult, ExpectedPath, PathKind, ProcessOutcome, VerificationReport};
