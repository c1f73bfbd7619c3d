use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock budget for a single script
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default Python interpreter, resolved through `PATH`
pub const DEFAULT_PYTHON: &str = "python3";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Interpreter command used for Python scripts
    pub python: String,

    /// Wall-clock timeout applied to every execution
    pub timeout: Duration,

    /// Directory that receives temporary script files. Falls back to the
    /// system temp directory.
    pub scratch_dir: Option<PathBuf>,

    /// Upper bound on simultaneously running scripts. `None` means unbounded.
    pub max_concurrent_executions: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            timeout: DEFAULT_TIMEOUT,
            scratch_dir: None,
            max_concurrent_executions: None,
        }
    }
}

impl ServiceConfig {
    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(scratch_dir.into());
        self
    }

    pub fn with_max_concurrent_executions(mut self, max: usize) -> Self {
        self.max_concurrent_executions = Some(max);
        self
    }
}
