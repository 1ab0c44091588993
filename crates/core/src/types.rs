//! 도메인 타입: 기대 경로, 프로세스 결과, 검사 결과, 검증 리포트

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProcessError;
use crate::params::TemplateParams;

/// 기대 경로의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// 일반 파일
    File,
    /// 디렉토리
    #[serde(alias = "dir")]
    Directory,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// 생성된 프로젝트에 반드시 존재해야 하는 경로
///
/// `path`는 프로젝트 루트 기준 상대 경로이며 `{project_slug}` 같은
/// 플레이스홀더를 포함할 수 있습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedPath {
    pub path: String,
    pub kind: PathKind,
}

impl ExpectedPath {
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::File,
        }
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: PathKind::Directory,
        }
    }
}

/// 외부 프로세스 한 번의 실행 결과
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// 진단 메시지에 쓰이는 이름 (예: "pytest")
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// 종료 코드. 시그널로 종료되면 `None`
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// 사람이 읽을 수 있는 명령줄
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 0 이 아닌 종료 코드를 [`ProcessError::Failed`]로 바꿉니다.
    pub fn into_checked(self) -> Result<Self, ProcessError> {
        if self.success() {
            Ok(self)
        } else {
            Err(ProcessError::Failed {
                label: self.label,
                code: self.code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// 검사 하나의 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    /// 실패 시 진단 메시지 (캡처된 stdout/stderr 포함)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub elapsed_ms: u64,
}

impl CheckResult {
    pub fn passed(name: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: None,
            elapsed_ms: millis(elapsed),
        }
    }

    pub fn failed(name: impl Into<String>, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
            elapsed_ms: millis(elapsed),
        }
    }
}

/// 한 세션의 전체 검증 리포트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// 템플릿 루트
    pub template: String,
    /// 렌더링된 프로젝트 경로
    pub project_dir: String,
    /// 렌더링에 사용된 파라미터 (slug 포함)
    pub params: TemplateParams,
    pub checks: Vec<CheckResult>,
}

impl VerificationReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
