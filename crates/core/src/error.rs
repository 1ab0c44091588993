//! 에러 타입: 도메인별 에러 정의
//!
//! 픽스처 단계(렌더링, 의존성 동기화)의 에러는 세션 전체를 중단시키고,
//! 구조/명령 검사의 에러는 해당 검사 결과에만 기록됩니다.

/// scaffold-verify 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 템플릿 파라미터 에러
    #[error("parameter error: {0}")]
    Params(#[from] ParamError),

    /// 외부 프로세스 실행 에러
    #[error("process error: {0}")]
    Process(#[from] ProcessError),

    /// 템플릿 렌더링 에러
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// 생성된 프로젝트 구조 에러
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 템플릿 파라미터 에러
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// 필수 파라미터 누락
    #[error("missing template parameter: {name}")]
    Missing { name: String },

    /// `key=value` 형식이 아님
    #[error("invalid parameter assignment '{input}': expected key=value")]
    InvalidAssignment { input: String },

    /// slug 가 패키지/모듈 이름으로 사용할 수 없음
    #[error("invalid project slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    /// 버전이 semver 형식이 아님
    #[error("invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    /// 치환할 수 없는 플레이스홀더
    #[error("unknown placeholder '{{{name}}}' in '{pattern}'")]
    UnknownPlaceholder { name: String, pattern: String },

    /// 닫히지 않은 중괄호 등 잘못된 패턴
    #[error("malformed pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },
}

/// 외부 프로세스 실행 에러
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// 빈 명령 벡터
    #[error("{label}: empty command")]
    EmptyCommand { label: String },

    /// 프로세스 생성 실패 (실행 파일 없음, 권한 등)
    #[error("{label}: failed to spawn '{program}': {reason}")]
    Spawn {
        label: String,
        program: String,
        reason: String,
    },

    /// 0 이 아닌 종료 코드: 캡처된 출력을 그대로 포함
    #[error("{label} failed:\nstdout: {stdout}\nstderr: {stderr}")]
    Failed {
        label: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

/// 템플릿 렌더링 에러
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// 템플릿 루트가 존재하지 않음
    #[error("template root not found: {path}")]
    TemplateNotFound { path: String },

    /// 대상 디렉토리 준비 실패
    #[error("cannot prepare destination {path}: {reason}")]
    Destination { path: String, reason: String },

    /// 템플릿 엔진 프로세스 실패
    #[error("template engine failed: {0}")]
    Engine(#[from] ProcessError),
}

/// 생성된 프로젝트 구조 에러
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// 기대한 경로가 없거나 종류가 다름
    #[error("missing expected paths: {}", missing.join(", "))]
    Missing { missing: Vec<String> },
}
