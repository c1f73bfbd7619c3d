use super::{
    fixtures::{code_samples::*, test_scenarios::*},
    utils::defaults::{leftover_files, short_timeout, test_config},
};
use crate::{
    languages::skip_if_not_available, CodeExecutionService, Error, ExecutionRequest,
    ExecutionStatus, Language, TIMEOUT_MESSAGE,
};
use assert_fs::TempDir;
use std::time::Instant;
use tokio::time::Duration;

/// Basic execution tests
pub mod basic_execution {
    use super::*;

    #[tokio::test]
    async fn test_python_hello() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service.execute(ExecutionRequest::python(PYTHON_HELLO)).await;
        assert_eq!(result.status, ExecutionStatus::Success);
        assert!(result.stdout.contains("hello\n"));
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_python_multiline() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_MULTILINE))
            .await;
        assert_eq!(result.stdout.trim(), "Factorial of 5 is 120");
    }

    #[tokio::test]
    async fn test_streams_captured_separately() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service.execute(ExecutionRequest::python(PYTHON_STDERR)).await;
        assert_eq!(result.stdout, "to stdout\n");
        assert_eq!(result.stderr, "to stderr\n");
    }

    #[tokio::test]
    async fn test_non_utf8_output_is_lossy() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_NON_UTF8))
            .await;
        assert_eq!(result.stdout, "ok \u{FFFD}\n");
    }

    #[test]
    fn test_unsupported_language_rejected() {
        for name in ["javascript", "Python", "", "rust"] {
            let parsed = name.parse::<Language>();
            assert!(matches!(parsed, Err(Error::UnsupportedLanguage(n)) if n == name));
        }
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
    }
}

/// Scripts that fail, hang or never start
pub mod error_handling {
    use super::*;

    #[tokio::test]
    async fn test_uncaught_exception_reported_on_stderr() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_DIVIDE_BY_ZERO))
            .await;
        assert_eq!(result.status, ExecutionStatus::Error);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("ZeroDivisionError"));
    }

    #[tokio::test]
    async fn test_partial_output_kept() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_PARTIAL_THEN_FAIL))
            .await;
        assert_eq!(result.stdout, "before\n");
        assert!(result.stderr.contains("RuntimeError: boom"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_a_failure() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_EXIT_CODE))
            .await;
        assert_eq!(result.status, ExecutionStatus::Error);
        assert_eq!(result.stdout, "leaving\n");
        assert!(result.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_stdin_is_closed() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service =
            CodeExecutionService::new(test_config(scratch.path()).with_timeout(Duration::from_secs(5)));

        let result = service
            .execute(ExecutionRequest::python(PYTHON_READS_STDIN))
            .await;
        assert_ne!(result.status, ExecutionStatus::Timeout);
        assert!(result.stderr.contains("EOFError"));
    }

    #[tokio::test]
    async fn test_timeout_handling() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()).with_timeout(short_timeout()));

        let started = Instant::now();
        let result = service
            .execute(ExecutionRequest::python(PYTHON_INFINITE_LOOP))
            .await;
        let elapsed = started.elapsed();

        assert_eq!(result.status, ExecutionStatus::Timeout);
        assert!(result.stdout.is_empty());
        assert_eq!(result.stderr, TIMEOUT_MESSAGE);
        assert!(elapsed < short_timeout() + Duration::from_secs(2));
        assert!(leftover_files(scratch.path()).is_empty());
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_a_result() {
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(
            test_config(scratch.path()).with_python("definitely-not-a-python-interpreter"),
        );

        let result = service.execute(ExecutionRequest::python(PYTHON_HELLO)).await;
        assert_eq!(result.status, ExecutionStatus::SystemError);
        assert!(result.stdout.is_empty());
        assert!(result
            .stderr
            .contains("Failed to start interpreter definitely-not-a-python-interpreter"));
        assert!(leftover_files(scratch.path()).is_empty());
    }

    #[tokio::test]
    async fn test_missing_scratch_dir_is_a_result() {
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(&scratch.path().join("gone")));

        let result = service.execute(ExecutionRequest::python(PYTHON_HELLO)).await;
        assert_eq!(result.status, ExecutionStatus::SystemError);
        assert!(result.stderr.starts_with("Failed to prepare script file"));
    }
}

/// Script files never outlive their call
pub mod cleanup {
    use super::*;

    #[tokio::test]
    async fn test_no_files_left_after_any_outcome() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()).with_timeout(short_timeout()));

        for code in [PYTHON_HELLO, PYTHON_DIVIDE_BY_ZERO, PYTHON_INFINITE_LOOP] {
            service.execute(ExecutionRequest::python(code)).await;
            assert!(
                leftover_files(scratch.path()).is_empty(),
                "script file left behind for {:?}",
                code
            );
        }
    }

    #[tokio::test]
    async fn test_cancelled_execution_removes_file() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service =
            CodeExecutionService::new(test_config(scratch.path()).with_timeout(Duration::from_secs(30)));

        let pending = service.execute(ExecutionRequest::python(PYTHON_INFINITE_LOOP));
        let outcome = tokio::time::timeout(Duration::from_millis(500), pending).await;

        assert!(outcome.is_err());
        assert!(leftover_files(scratch.path()).is_empty());
    }
}

/// Tests for concurrent execution
pub mod concurrent_execution {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_calls_do_not_cross_talk() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(test_config(scratch.path()));

        let mut handles = vec![];
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                let code = format!("print('request {}')", i);
                (i, service.execute(ExecutionRequest::python(code)).await)
            }));
        }

        for handle in handles {
            let (i, result) = handle.await.unwrap();
            assert_eq!(result.stdout, format!("request {}\n", i));
            assert!(result.stderr.is_empty());
        }
        assert!(leftover_files(scratch.path()).is_empty());
    }

    #[tokio::test]
    async fn test_concurrency_limit_releases_slots() {
        if skip_if_not_available(&["python3"]) {
            return;
        }
        let scratch = TempDir::new().unwrap();
        let service = CodeExecutionService::new(
            test_config(scratch.path()).with_max_concurrent_executions(2),
        );

        let mut handles = vec![];
        for _ in 0..4 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.execute(ExecutionRequest::python(PYTHON_HELLO)).await
            }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().status, ExecutionStatus::Success);
        }
        assert_eq!(service.available_slots(), Some(2));
    }
}
