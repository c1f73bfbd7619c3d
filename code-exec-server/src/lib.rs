use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use code_exec::{CodeExecutionService, HistoryStore};
use project_tracker::ProjectTracker;
use serde_json::json;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

mod routes;

pub use routes::execute::{ExecuteRequest, ExecuteResponse, UNSUPPORTED_LANGUAGE_MESSAGE};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error(transparent)]
    History(#[from] code_exec::Error),
    #[error(transparent)]
    Tracker(#[from] project_tracker::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // Same shape as a successful execution
            ServerError::UnsupportedLanguage(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "output": "", "error": UNSUPPORTED_LANGUAGE_MESSAGE }),
            ),
            ServerError::Tracker(project_tracker::Error::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, json!({ "error": self.to_string() }))
            }
            ServerError::Tracker(_) | ServerError::History(_) => {
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            ServerError::ServerError(_) => {
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub(crate) service: CodeExecutionService,
    pub(crate) history: Arc<dyn HistoryStore>,
    pub(crate) tracker: Arc<ProjectTracker>,
    pub(crate) repo_path: PathBuf,
}

impl AppState {
    pub fn new(
        service: CodeExecutionService,
        history: Arc<dyn HistoryStore>,
        tracker: Arc<ProjectTracker>,
        repo_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            history,
            tracker,
            repo_path: repo_path.into(),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/execute", post(routes::execute::execute))
        .route("/history", get(routes::execute::history))
        .route(
            "/timeline",
            get(routes::tracker::list_timelines).post(routes::tracker::add_timeline),
        )
        .route(
            "/raise-request",
            get(routes::tracker::list_raise_requests).post(routes::tracker::raise_request),
        )
        .route(
            "/raise-request/:index/approve",
            put(routes::tracker::approve_raise_request),
        )
        .route(
            "/review-request",
            get(routes::tracker::list_review_requests).post(routes::tracker::request_review),
        )
        .route(
            "/review-request/:index/approve",
            put(routes::tracker::approve_review),
        )
        .route("/commit", post(routes::tracker::add_commit))
        .route("/commit-history", get(routes::tracker::list_commits))
        .route("/commit-history/git", get(routes::tracker::git_history))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting code execution server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Code execution backend is running" }))
}

async fn health_check() -> &'static str {
    "OK"
}
