//! scaffold-verify 하네스
//!
//! 템플릿을 고정 파라미터로 임시 디렉토리에 렌더링하고, 생성된 프로젝트의
//! 의존성을 설치한 뒤, 외부 검사 명령들을 실행합니다.
//!
//! # 모듈 구조
//! - [`engine`]: 템플릿 엔진 경계 (`copier`)
//! - [`runner`]: 외부 프로세스 실행
//! - [`fixture`]: 렌더링된 프로젝트의 수명 관리
//! - [`structure`], [`checks`], [`snapshot`]: 개별 검사
//! - [`verifier`]: 전체 순서 오케스트레이션

pub mod checks;
pub mod engine;
pub mod fixture;
pub mod plan;
pub mod runner;
pub mod snapshot;
pub mod structure;
pub mod verifier;

pub use checks::{STRUCTURE_CHECK, run_check, structure_check};
pub use engine::{CopierEngine, RenderRequest, TemplateEngine};
pub use fixture::RenderedProject;
pub use plan::{CheckPlan, VerificationPlan};
pub use runner::{CommandRunner, SystemRunner, run_and_check};
pub use snapshot::{SnapshotDiff, TreeSnapshot};
pub use structure::assert_structure;
pub use verifier::{IDEMPOTENCE_CHECK, VerificationSession, Verifier};
