use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::{
    config::ServiceConfig,
    executor::CodeExecutor,
    types::{ExecutionRequest, ExecutionResult},
};

#[derive(Clone)]
pub struct CodeExecutionService {
    executor: Arc<CodeExecutor>,
    semaphore: Option<Arc<Semaphore>>,
    config: ServiceConfig,
}

impl CodeExecutionService {
    pub fn new(config: ServiceConfig) -> Self {
        let semaphore = config
            .max_concurrent_executions
            .map(|max| Arc::new(Semaphore::new(max)));

        Self {
            executor: Arc::new(CodeExecutor::new(&config)),
            semaphore,
            config,
        }
    }

    /// Run a request to completion or timeout.
    ///
    /// Never fails: anything that stops the script from running is reported
    /// through a `system_error` result with the reason on stderr.
    pub async fn execute(&self, request: ExecutionRequest) -> ExecutionResult {
        let _permit = match &self.semaphore {
            Some(semaphore) => match semaphore.clone().acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(e) => {
                    error!("Failed to acquire execution permit: {}", e);
                    return ExecutionResult::system_error(&crate::Error::System(format!(
                        "Failed to acquire execution permit: {}",
                        e
                    )));
                }
            },
            None => None,
        };

        debug!(
            "Starting code execution for language: {}",
            request.language
        );

        let result = self
            .executor
            .execute(
                &request,
                self.config.scratch_dir.as_deref(),
                self.config.timeout,
            )
            .await;

        match result {
            Ok(result) => {
                info!(
                    "Code execution finished: status={} time={:?}",
                    result.status, result.execution_time
                );
                result
            }
            Err(e) => {
                error!("Code execution failed: {}", e);
                ExecutionResult::system_error(&e)
            }
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Free execution slots, or `None` when executions are unbounded
    pub fn available_slots(&self) -> Option<usize> {
        self.semaphore.as_ref().map(|s| s.available_permits())
    }
}
