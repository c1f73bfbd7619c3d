use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn pending() -> String {
    "Pending".to_string()
}

/// A project phase with its planned dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub phase_name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTimeline {
    pub phase_name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "pending")]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaiseStatus {
    Open,
    Approved,
}

/// A request to start work on a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseRequest {
    pub module_name: String,
    pub description: String,
    pub raised_by: String,
    pub status: RaiseStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewRaiseRequest {
    pub module_name: String,
    pub description: String,
    pub raised_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    Pending,
    Approved,
}

/// A request for a reviewer to look at a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub module_name: String,
    pub reviewer: String,
    pub comments: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReviewRequest {
    pub module_name: String,
    pub reviewer: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// A commit logged by hand through the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub commit_id: String,
    pub message: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

/// A commit read from a git repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    pub commit_hash: String,
    pub author: String,
    pub message: String,
    pub timestamp: String,
}
