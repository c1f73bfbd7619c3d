use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::{self, Instant};
use tracing::{debug, warn};

use crate::{
    config::ServiceConfig,
    error::Error,
    languages::{resolve_command, PythonExecutor},
    script::ScriptFile,
    types::{ExecutionRequest, ExecutionResult, ExecutionStatus, Language},
};

/// Trait for language-specific code executors
pub trait LanguageExecutor: Send + Sync {
    /// Get the file extension for source files
    fn file_extension(&self) -> &str;

    /// Get the command to run the code
    fn run_command(&self) -> &str;

    /// Arguments passed to the run command for the given script
    fn run_args(&self, script: &Path) -> Vec<OsString>;
}

/// Writes each request to its own script file and runs it under a timeout
pub struct CodeExecutor {
    python: String,
}

impl CodeExecutor {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            python: config.python.clone(),
        }
    }

    /// Execute one request. The script file is gone by the time this returns,
    /// whatever the outcome.
    pub async fn execute(
        &self,
        request: &ExecutionRequest,
        scratch_dir: Option<&Path>,
        timeout: Duration,
    ) -> Result<ExecutionResult, Error> {
        let executor = self.create_executor(request.language);
        let script = ScriptFile::create(scratch_dir, executor.file_extension(), &request.code)?;

        let result = self.run(executor.as_ref(), script.path(), timeout).await;

        script.remove();
        result
    }

    async fn run(
        &self,
        executor: &dyn LanguageExecutor,
        script: &Path,
        timeout: Duration,
    ) -> Result<ExecutionResult, Error> {
        let cmd = executor.run_command();
        let cmd_path = resolve_command(cmd)?;
        let args = executor.run_args(script);

        debug!("Execute - Command: {}", cmd_path.display());
        debug!("Execute - Args: {:?}", args);

        let mut command = Command::new(&cmd_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let start = Instant::now();
        let mut child = command.spawn().map_err(|source| Error::Spawn {
            command: cmd.to_string(),
            source,
        })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // The deadline covers draining the pipes too, so a grandchild holding
        // them open cannot stall the call.
        let waiting = &mut child;
        let completion = async move { tokio::try_join!(waiting.wait(), stdout, stderr) };

        match time::timeout(timeout, completion).await {
            Ok(Ok((status, stdout, stderr))) => {
                let execution_time = start.elapsed();
                debug!("Process exited with {} after {:?}", status, execution_time);

                Ok(ExecutionResult {
                    status: if status.success() {
                        ExecutionStatus::Success
                    } else {
                        ExecutionStatus::Error
                    },
                    stdout: String::from_utf8_lossy(&stdout).to_string(),
                    stderr: String::from_utf8_lossy(&stderr).to_string(),
                    execution_time,
                })
            }
            Ok(Err(e)) => {
                if let Err(kill_err) = child.kill().await {
                    warn!("Failed to kill process after I/O error: {}", kill_err);
                }
                Err(Error::Process(e))
            }
            Err(_) => {
                debug!("Process exceeded {:?}, killing", timeout);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill timed out process: {}", e);
                }
                Ok(ExecutionResult::timed_out(start.elapsed()))
            }
        }
    }

    fn create_executor(&self, language: Language) -> Box<dyn LanguageExecutor> {
        match language {
            Language::Python => Box::new(PythonExecutor::new(Some(self.python.clone()))),
        }
    }
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
