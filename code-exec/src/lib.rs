//! # Code Execution Service
//!
//! Runs Python snippets submitted over HTTP in a child process. Each call
//! writes the source to its own temporary file, runs the interpreter on it
//! under a wall-clock timeout, captures stdout and stderr, and deletes the
//! file before returning.
//!
//! There is no isolation: a script runs with the same user, filesystem and
//! network access as the host process, bounded only by the timeout. Do not
//! expose this to untrusted users without putting it behind a real sandbox.

mod config;
mod error;
mod executor;
pub mod history;
mod languages;
mod script;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ServiceConfig, DEFAULT_PYTHON, DEFAULT_TIMEOUT};
pub use error::Error;
pub use executor::{CodeExecutor, LanguageExecutor};
pub use history::{HistoryRecord, HistoryStore, InMemoryHistory, JsonFileHistory};
pub use languages::PythonExecutor;
pub use service::CodeExecutionService;
pub use types::{ExecutionRequest, ExecutionResult, ExecutionStatus, Language, TIMEOUT_MESSAGE};

/// Result type for code execution operations
pub type Result<T> = std::result::Result<T, Error>;
