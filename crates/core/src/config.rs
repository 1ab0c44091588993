//! 설정 관리: scaffold-verify.toml 파싱 및 런타임 설정
//!
//! [`ScaffoldConfig`]는 템플릿 렌더링, 의존성 동기화, 구조 검사,
//! 명령 검사의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`SCAFFOLD_VERIFY_TEMPLATE_SRC=../template` 형식)
//! 3. 설정 파일 (`scaffold-verify.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), scaffold_verify_core::error::VerifyError> {
//! use scaffold_verify_core::config::ScaffoldConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ScaffoldConfig::load("scaffold-verify.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ScaffoldConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, VerifyError};
use crate::params::TemplateParams;
use crate::types::ExpectedPath;

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_FILE: &str = "scaffold-verify.toml";

/// scaffold-verify 통합 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 템플릿 렌더링 설정
    #[serde(default)]
    pub template: TemplateConfig,
    /// 의존성 동기화 설정
    #[serde(default)]
    pub sync: SyncConfig,
    /// 구조 검사 설정
    #[serde(default)]
    pub structure: StructureConfig,
    /// 명령 검사 목록. 지정하면 기본 목록을 통째로 대체합니다.
    #[serde(default = "default_checks")]
    pub checks: Vec<CheckConfig>,
}

impl ScaffoldConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VerifyError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값을 사용하는 [`load`](Self::load)
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, VerifyError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드, 검증 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VerifyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VerifyError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                VerifyError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, VerifyError> {
        toml::from_str(toml_str).map_err(|e| {
            VerifyError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `SCAFFOLD_VERIFY_{SECTION}_{FIELD}`
    /// 예: `SCAFFOLD_VERIFY_TEMPLATE_VCS_REF=main`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(
            &mut self.general.log_level,
            "SCAFFOLD_VERIFY_GENERAL_LOG_LEVEL",
        );
        override_string(
            &mut self.general.log_format,
            "SCAFFOLD_VERIFY_GENERAL_LOG_FORMAT",
        );

        // Template
        override_string(&mut self.template.src, "SCAFFOLD_VERIFY_TEMPLATE_SRC");
        override_string(
            &mut self.template.vcs_ref,
            "SCAFFOLD_VERIFY_TEMPLATE_VCS_REF",
        );
        override_string(&mut self.template.engine, "SCAFFOLD_VERIFY_TEMPLATE_ENGINE");
        override_bool(
            &mut self.template.idempotence,
            "SCAFFOLD_VERIFY_TEMPLATE_IDEMPOTENCE",
        );

        // Sync
        override_words(&mut self.sync.command, "SCAFFOLD_VERIFY_SYNC_COMMAND");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), VerifyError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        if self.template.src.trim().is_empty() {
            return Err(invalid("template.src", "must not be empty".to_owned()));
        }

        if self.template.engine.trim().is_empty() {
            return Err(invalid("template.engine", "must not be empty".to_owned()));
        }

        // slug / version 불변식은 파라미터 에러로 그대로 전달
        let params = self.template.data.clone().normalize()?;

        if self.sync.command.is_empty() {
            return Err(invalid(
                "sync.command",
                "must contain at least the program name".to_owned(),
            ));
        }
        check_placeholders(&params, "sync.command", &self.sync.command)?;

        for (i, expected) in self.structure.expected.iter().enumerate() {
            if expected.path.trim().is_empty() {
                return Err(invalid(
                    &format!("structure.expected[{i}].path"),
                    "must not be empty".to_owned(),
                ));
            }
            if Path::new(&expected.path).is_absolute() {
                return Err(invalid(
                    &format!("structure.expected[{i}].path"),
                    "must be relative to the project root".to_owned(),
                ));
            }
            params.interpolate(&expected.path).map_err(|e| {
                invalid(&format!("structure.expected[{i}].path"), e.to_string())
            })?;
        }

        let mut seen = HashSet::new();
        for (i, check) in self.checks.iter().enumerate() {
            if check.name.trim().is_empty() {
                return Err(invalid(
                    &format!("checks[{i}].name"),
                    "must not be empty".to_owned(),
                ));
            }
            if !seen.insert(check.name.as_str()) {
                return Err(invalid(
                    &format!("checks[{i}].name"),
                    format!("duplicate check name '{}'", check.name),
                ));
            }
            if check.command.is_empty() {
                return Err(invalid(
                    &format!("checks[{i}].command"),
                    "must contain at least the program name".to_owned(),
                ));
            }
            if let Some(j) = check.prepare.iter().position(Vec::is_empty) {
                return Err(invalid(
                    &format!("checks[{i}].prepare[{j}]"),
                    "must contain at least the program name".to_owned(),
                ));
            }
            check_placeholders(&params, &format!("checks[{i}].command"), &check.command)?;
            for (j, step) in check.prepare.iter().enumerate() {
                check_placeholders(&params, &format!("checks[{i}].prepare[{j}]"), step)?;
            }
        }

        Ok(())
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            template: TemplateConfig::default(),
            sync: SyncConfig::default(),
            structure: StructureConfig::default(),
            checks: default_checks(),
        }
    }
}

/// `{name}` 플레이스홀더가 모두 치환 가능한지 확인합니다.
fn check_placeholders(
    params: &TemplateParams,
    field: &str,
    argv: &[String],
) -> Result<(), VerifyError> {
    params
        .interpolate_all(argv)
        .map(|_| ())
        .map_err(|e| invalid(field, e.to_string()))
}

fn invalid(field: &str, reason: String) -> VerifyError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 템플릿 렌더링 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// 템플릿 루트 경로
    pub src: String,
    /// 렌더링할 VCS 참조. 빈 문자열이면 작업 트리를 그대로 사용
    pub vcs_ref: String,
    /// 질문에 기본값 사용 (비대화형)
    pub defaults: bool,
    /// 템플릿 태스크/마이그레이션 실행 허용
    pub trust: bool,
    /// 템플릿 엔진 실행 파일
    pub engine: String,
    /// 같은 파라미터로 두 번 렌더링하여 구조 비교
    pub idempotence: bool,
    /// 템플릿 파라미터. 지정하면 기본 매핑을 통째로 대체합니다.
    pub data: TemplateParams,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            src: ".".to_owned(),
            vcs_ref: "HEAD".to_owned(),
            defaults: true,
            trust: true,
            engine: "copier".to_owned(),
            idempotence: false,
            data: default_template_data(),
        }
    }
}

impl TemplateConfig {
    /// 빈 `vcs_ref`는 참조 미지정으로 취급
    pub fn vcs_ref(&self) -> Option<&str> {
        let r = self.vcs_ref.trim();
        if r.is_empty() { None } else { Some(r) }
    }
}

/// 기본 템플릿 파라미터
pub fn default_template_data() -> TemplateParams {
    TemplateParams::from_pairs([
        ("author_name", "Test Author"),
        ("author_email", "test@example.com"),
        ("github_username", "testuser"),
        ("project_name", "Test Project"),
        ("project_slug", "test_project"),
        ("project_short_description", "A test project."),
        ("version", "0.1.0"),
        ("license", "MIT"),
    ])
}

/// 의존성 동기화 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// 생성된 프로젝트 루트에서 실행할 명령
    pub command: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command: vec!["uv".to_owned(), "sync".to_owned()],
        }
    }
}

/// 구조 검사 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub expected: Vec<ExpectedPath>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            expected: vec![
                ExpectedPath::file("pyproject.toml"),
                ExpectedPath::file("README.md"),
                ExpectedPath::file("LICENSE"),
                ExpectedPath::file("Makefile"),
                ExpectedPath::dir("src/{project_slug}"),
                ExpectedPath::file("src/{project_slug}/__init__.py"),
                ExpectedPath::file("src/{project_slug}/main.py"),
                ExpectedPath::file("tests/test_{project_slug}.py"),
            ],
        }
    }
}

/// 명령 검사 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// 리포트에 표시되는 검사 이름
    pub name: String,
    /// 실패 메시지 접두어. 없으면 `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 실행할 명령 (플레이스홀더 허용)
    pub command: Vec<String>,
    /// 본 명령 전에 실행할 준비 명령들. 하나라도 실패하면 검사 실패
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prepare: Vec<Vec<String>>,
}

impl CheckConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// 기본 명령 검사: 생성된 테스트, 엔트리 포인트, pre-commit 훅
pub fn default_checks() -> Vec<CheckConfig> {
    vec![
        CheckConfig {
            name: "generated-tests".to_owned(),
            label: Some("pytest".to_owned()),
            command: words(&["uv", "run", "pytest"]),
            prepare: Vec::new(),
        },
        CheckConfig {
            name: "entry-point".to_owned(),
            label: Some("main module".to_owned()),
            command: words(&["uv", "run", "python", "-m", "{project_slug}.main"]),
            prepare: Vec::new(),
        },
        CheckConfig {
            name: "pre-commit".to_owned(),
            label: Some("pre-commit".to_owned()),
            command: words(&["uvx", "pre-commit", "run", "--all-files"]),
            prepare: vec![words(&["git", "add", "."])],
        },
    ]
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

// 공백 구분 명령 벡터. 빈 값은 무시
fn override_words(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        let parsed: Vec<String> = val.split_whitespace().map(str::to_owned).collect();
        if parsed.is_empty() {
            warn!(env_key, "empty command in env var, ignoring");
        } else {
            *target = parsed;
        }
    }
}
