use axum::{extract::State, Json};
use code_exec::{ExecutionRequest, HistoryRecord, Language};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{AppState, ServerError};

pub const UNSUPPORTED_LANGUAGE_MESSAGE: &str = "Only Python supported for now";

fn default_language() -> String {
    "python".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExecuteRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub output: String,
    pub error: String,
}

pub(crate) async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ServerError> {
    let language: Language = payload
        .language
        .parse()
        .map_err(|_| ServerError::UnsupportedLanguage(payload.language.clone()))?;

    let result = state
        .service
        .execute(ExecutionRequest {
            language,
            code: payload.code.clone(),
        })
        .await;

    if let Err(e) = state
        .history
        .record_execution(&payload.code, &result.stdout, &result.stderr)
        .await
    {
        warn!("Failed to record execution history: {}", e);
    }

    Ok(Json(ExecuteResponse {
        output: result.stdout,
        error: result.stderr,
    }))
}

pub(crate) async fn history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRecord>>, ServerError> {
    Ok(Json(state.history.all().await?))
}
