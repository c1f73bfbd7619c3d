use std::ffi::OsString;
use std::path::Path;

use crate::{config::DEFAULT_PYTHON, executor::LanguageExecutor};

pub struct PythonExecutor {
    interpreter: String,
}

impl PythonExecutor {
    pub fn new(interpreter: Option<String>) -> Self {
        Self {
            interpreter: interpreter.unwrap_or_else(|| DEFAULT_PYTHON.to_string()),
        }
    }
}

impl LanguageExecutor for PythonExecutor {
    fn file_extension(&self) -> &str {
        "py"
    }

    fn run_command(&self) -> &str {
        &self.interpreter
    }

    fn run_args(&self, script: &Path) -> Vec<OsString> {
        vec![script.as_os_str().to_owned()]
    }
}
