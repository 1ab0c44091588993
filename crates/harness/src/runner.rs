//! 외부 프로세스 실행 추상화
//!
//! [`CommandRunner`] trait 은 프로세스 생성을 추상화하여, 운영 코드는
//! [`SystemRunner`]를, 테스트는 기록/스크립트용 러너를 사용할 수 있게 합니다.
//!
//! 모든 호출은 동기 블로킹이며 stdout/stderr 를 캡처합니다.
//! 재시도와 타임아웃은 없습니다. 각 명령은 정확히 한 번 실행됩니다.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{debug, info, warn};

use scaffold_verify_core::error::ProcessError;
use scaffold_verify_core::types::ProcessOutcome;

/// 외부 명령 실행 trait
pub trait CommandRunner {
    /// `argv[0]`을 `cwd`에서 실행하고 결과를 반환합니다.
    ///
    /// 0 이 아닌 종료 코드는 에러가 아닙니다. 프로세스를 생성할 수 없을 때만 `Err`.
    fn run(&self, label: &str, argv: &[String], cwd: &Path) -> Result<ProcessOutcome, ProcessError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, label: &str, argv: &[String], cwd: &Path) -> Result<ProcessOutcome, ProcessError> {
        (**self).run(label, argv, cwd)
    }
}

/// `std::process::Command` 기반 러너
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    env: Vec<(String, String)>,
    env_remove: Vec<String>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 생성된 프로젝트용 러너
    ///
    /// 호출자 쪽에서 활성화된 가상환경을 지워, `uv`가 생성 프로젝트 자신의
    /// 환경을 사용하게 합니다. CLI 와 실제 템플릿 테스트가 같은 러너를 씁니다.
    pub fn for_generated_project() -> Self {
        Self::new().env_remove("VIRTUAL_ENV")
    }

    /// 모든 자식 프로세스에 환경변수를 설정합니다.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// 모든 자식 프로세스에서 환경변수를 제거합니다.
    ///
    /// 활성화된 가상환경(`VIRTUAL_ENV`)이 생성 프로젝트의 환경과 섞이지 않게 할 때 사용합니다.
    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, label: &str, argv: &[String], cwd: &Path) -> Result<ProcessOutcome, ProcessError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ProcessError::EmptyCommand {
                label: label.to_owned(),
            });
        };

        info!(label, command = %argv.join(" "), cwd = %cwd.display(), "running external command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for key in &self.env_remove {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let started = Instant::now();
        let output = cmd.output().map_err(|e| {
            warn!(label, program = program.as_str(), error = %e, "failed to spawn command");
            ProcessError::Spawn {
                label: label.to_owned(),
                program: program.clone(),
                reason: e.to_string(),
            }
        })?;
        let elapsed = started.elapsed();

        let outcome = ProcessOutcome {
            label: label.to_owned(),
            program: program.clone(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed,
        };

        debug!(
            label,
            code = ?outcome.code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "command finished"
        );

        Ok(outcome)
    }
}

/// 명령을 실행하고 종료 코드 0 을 요구합니다.
///
/// 실패 시 에러 메시지에 캡처된 stdout/stderr 를 포함합니다.
pub fn run_and_check<R: CommandRunner + ?Sized>(
    runner: &R,
    label: &str,
    argv: &[String],
    cwd: &Path,
) -> Result<ProcessOutcome, ProcessError> {
    let outcome = runner.run(label, argv, cwd)?;
    if !outcome.success() {
        warn!(label, code = ?outcome.code, "command exited unsuccessfully");
    }
    outcome.into_checked()
}
