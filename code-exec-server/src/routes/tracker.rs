use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use project_tracker::{
    Commit, GitCommit, NewRaiseRequest, NewReviewRequest, NewTimeline, RaiseRequest,
    ReviewRequest, Timeline,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AppState, ServerError};

type Created = (StatusCode, Json<Value>);

fn created(message: &str) -> Created {
    (StatusCode::CREATED, Json(json!({ "message": message })))
}

fn ok(message: &str) -> Json<Value> {
    Json(json!({ "message": message }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApproveReview {
    #[serde(default)]
    comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewCommit {
    message: String,
    author: String,
}

pub(crate) async fn add_timeline(
    State(state): State<AppState>,
    Json(new): Json<NewTimeline>,
) -> Created {
    state.tracker.add_timeline(new).await;
    created("Timeline added")
}

pub(crate) async fn list_timelines(State(state): State<AppState>) -> Json<Vec<Timeline>> {
    Json(state.tracker.timelines().await)
}

pub(crate) async fn raise_request(
    State(state): State<AppState>,
    Json(new): Json<NewRaiseRequest>,
) -> Created {
    state.tracker.raise_request(new).await;
    created("Raise request created")
}

pub(crate) async fn list_raise_requests(State(state): State<AppState>) -> Json<Vec<RaiseRequest>> {
    Json(state.tracker.raise_requests().await)
}

pub(crate) async fn approve_raise_request(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<Value>, ServerError> {
    state.tracker.approve_raise_request(index).await?;
    Ok(ok("Raise request approved"))
}

pub(crate) async fn request_review(
    State(state): State<AppState>,
    Json(new): Json<NewReviewRequest>,
) -> Created {
    state.tracker.request_review(new).await;
    created("Review request submitted")
}

pub(crate) async fn list_review_requests(
    State(state): State<AppState>,
) -> Json<Vec<ReviewRequest>> {
    Json(state.tracker.review_requests().await)
}

/// The body is optional; without one the review is approved with the
/// default comment.
pub(crate) async fn approve_review(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    body: Option<Json<ApproveReview>>,
) -> Result<Json<Value>, ServerError> {
    let comments = body.and_then(|Json(body)| body.comments);
    state.tracker.approve_review(index, comments).await?;
    Ok(ok("Review approved"))
}

pub(crate) async fn add_commit(
    State(state): State<AppState>,
    Json(new): Json<NewCommit>,
) -> Created {
    state.tracker.add_commit(new.message, new.author).await;
    created("Commit added")
}

pub(crate) async fn list_commits(State(state): State<AppState>) -> Json<Vec<Commit>> {
    Json(state.tracker.commits().await)
}

pub(crate) async fn git_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<GitCommit>>, ServerError> {
    Ok(Json(project_tracker::git_log(&state.repo_path).await?))
}
