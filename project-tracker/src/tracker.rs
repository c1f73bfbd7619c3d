use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::Error,
    types::{
        Commit, NewRaiseRequest, NewReviewRequest, NewTimeline, RaiseRequest, RaiseStatus,
        ReviewRequest, ReviewStatus, Timeline,
    },
};

const DEFAULT_APPROVAL_COMMENT: &str = "Approved";

/// Project-tracking state. Entries are addressed by their position in the
/// list they were appended to; nothing is ever removed.
#[derive(Default)]
pub struct ProjectTracker {
    timelines: RwLock<Vec<Timeline>>,
    raise_requests: RwLock<Vec<RaiseRequest>>,
    review_requests: RwLock<Vec<ReviewRequest>>,
    commits: RwLock<Vec<Commit>>,
}

impl ProjectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_timeline(&self, new: NewTimeline) -> Timeline {
        let timeline = Timeline {
            phase_name: new.phase_name,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
        };
        self.timelines.write().await.push(timeline.clone());
        info!("Timeline added: {}", timeline.phase_name);
        timeline
    }

    pub async fn timelines(&self) -> Vec<Timeline> {
        self.timelines.read().await.clone()
    }

    pub async fn raise_request(&self, new: NewRaiseRequest) -> RaiseRequest {
        let request = RaiseRequest {
            module_name: new.module_name,
            description: new.description,
            raised_by: new.raised_by,
            status: RaiseStatus::Open,
            created_at: Utc::now(),
        };
        self.raise_requests.write().await.push(request.clone());
        info!(
            "Raise request created for {} by {}",
            request.module_name, request.raised_by
        );
        request
    }

    pub async fn raise_requests(&self) -> Vec<RaiseRequest> {
        self.raise_requests.read().await.clone()
    }

    pub async fn approve_raise_request(&self, index: usize) -> Result<RaiseRequest, Error> {
        let mut requests = self.raise_requests.write().await;
        let request = requests.get_mut(index).ok_or(Error::NotFound {
            kind: "raise request",
            index,
        })?;
        request.status = RaiseStatus::Approved;
        info!("Raise request {} approved", index);
        Ok(request.clone())
    }

    pub async fn request_review(&self, new: NewReviewRequest) -> ReviewRequest {
        let request = ReviewRequest {
            module_name: new.module_name,
            reviewer: new.reviewer,
            comments: new.comments,
            status: ReviewStatus::Pending,
            created_at: Utc::now(),
        };
        self.review_requests.write().await.push(request.clone());
        info!(
            "Review of {} requested from {}",
            request.module_name, request.reviewer
        );
        request
    }

    pub async fn review_requests(&self) -> Vec<ReviewRequest> {
        self.review_requests.read().await.clone()
    }

    /// Mark a review approved. Without comments the review is annotated
    /// with "Approved".
    pub async fn approve_review(
        &self,
        index: usize,
        comments: Option<String>,
    ) -> Result<ReviewRequest, Error> {
        let mut requests = self.review_requests.write().await;
        let request = requests.get_mut(index).ok_or(Error::NotFound {
            kind: "review request",
            index,
        })?;
        request.status = ReviewStatus::Approved;
        request.comments = Some(comments.unwrap_or_else(|| DEFAULT_APPROVAL_COMMENT.to_string()));
        info!("Review request {} approved", index);
        Ok(request.clone())
    }

    pub async fn add_commit(&self, message: String, author: String) -> Commit {
        let mut commit_id = Uuid::new_v4().simple().to_string();
        commit_id.truncate(8);

        let commit = Commit {
            commit_id,
            message,
            author,
            timestamp: Utc::now(),
        };
        self.commits.write().await.push(commit.clone());
        info!("Commit {} added by {}", commit.commit_id, commit.author);
        commit
    }

    pub async fn commits(&self) -> Vec<Commit> {
        self.commits.read().await.clone()
    }
}
