//! Project-tracking store: timelines, raise requests, review requests and a
//! hand-kept commit log, plus a reader for a real repository's `git log`.

mod error;
mod git;
mod tracker;
mod types;

pub use error::Error;
pub use git::git_log;
pub use tracker::ProjectTracker;
pub use types::{
    Commit, GitCommit, NewRaiseRequest, NewReviewRequest, NewTimeline, RaiseRequest, RaiseStatus,
    ReviewRequest, ReviewStatus, Timeline,
};

pub type Result<T> = std::result::Result<T, Error>;
