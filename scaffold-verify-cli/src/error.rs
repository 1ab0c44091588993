//! CLI-specific error types and exit code mapping

use scaffold_verify_core::error::VerifyError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Rendering or dependency sync failed; no checks ran.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// The session completed but at least one check failed.
    #[error("{failed} of {total} checks failed")]
    ChecksFailed { failed: usize, total: usize },

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                      |
    /// |------|------------------------------|
    /// | 0    | Success                      |
    /// | 1    | General / command error      |
    /// | 2    | Configuration error          |
    /// | 3    | Render or sync failed        |
    /// | 4    | One or more checks failed    |
    /// | 10   | IO error                     |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Fixture(_) => 3,
            Self::ChecksFailed { .. } => 4,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

impl From<VerifyError> for CliError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::Config(_) | VerifyError::Params(_) => Self::Config(e.to_string()),
            VerifyError::Process(_) | VerifyError::Render(_) => Self::Fixture(e.to_string()),
            VerifyError::Io(io) => Self::Io(io),
            VerifyError::Structure(_) => Self::Command(e.to_string()),
        }
    }
}
