//! Error types and exit codes for the hopcost driver
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, serialization, logging setup)
//! - 2: Usage error (bad flags/args)
//! - 3: Input error (malformed test-case data)

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Failure = 1,
    Usage = 2,
    Input = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    Usage(String),

    // Input errors (exit code 3)
    #[error("line {line}: {reason}")]
    Input { line: usize, reason: String },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl CliError {
    pub fn invalid_token(line: usize, expected: &str, token: &str) -> Self {
        CliError::Input {
            line,
            reason: format!("expected {}, found {:?}", expected, token),
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage(_) => ExitCode::Usage,
            CliError::Input { .. } | CliError::UnexpectedEof { .. } => ExitCode::Input,
            CliError::Io(_) | CliError::Json(_) | CliError::Logging(_) => ExitCode::Failure,
        }
    }
}
