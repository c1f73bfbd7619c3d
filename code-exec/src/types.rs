use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;

/// Message reported on stderr when a script runs past its deadline
pub const TIMEOUT_MESSAGE: &str = "Execution timed out";

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            _ => Err(Error::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => f.write_str("python"),
        }
    }
}

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Programming language
    pub language: Language,
    /// Source code to execute
    pub code: String,
}

impl ExecutionRequest {
    pub fn python(code: impl Into<String>) -> Self {
        Self {
            language: Language::Python,
            code: code.into(),
        }
    }
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Execution status
    pub status: ExecutionStatus,
    /// Program output (stdout)
    pub stdout: String,
    /// Program errors (stderr), or a description of what went wrong
    pub stderr: String,
    /// Wall-clock time from spawn to completion
    pub execution_time: Duration,
}

impl ExecutionResult {
    pub(crate) fn timed_out(execution_time: Duration) -> Self {
        Self {
            status: ExecutionStatus::Timeout,
            stdout: String::new(),
            stderr: TIMEOUT_MESSAGE.to_string(),
            execution_time,
        }
    }

    pub(crate) fn system_error(error: &Error) -> Self {
        Self {
            status: ExecutionStatus::SystemError,
            stdout: String::new(),
            stderr: error.to_string(),
            execution_time: Duration::ZERO,
        }
    }
}

/// Execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Exited with status 0
    Success,
    /// Exited with a non-zero status or was killed by a signal
    Error,
    Timeout,
    /// The script never ran
    SystemError,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStatus::Success => "success",
            ExecutionStatus::Error => "error",
            ExecutionStatus::Timeout => "timeout",
            ExecutionStatus::SystemError => "system_error",
        };
        f.write_str(s)
    }
}
