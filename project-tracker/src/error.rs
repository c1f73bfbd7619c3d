use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} {index} not found")]
    NotFound { kind: &'static str, index: usize },

    #[error("git log failed: {0}")]
    Git(String),
}
