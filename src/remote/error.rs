//! Errors surfaced by the remote backend.

use thiserror::Error;

/// Failures of a remote request. Unlike cache errors these reach the
/// calling feature, which decides what the user sees.
#[derive(Error, Debug)]
pub enum BackendError {
    /// No record matched the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// Session missing or lacking permission
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Transport failure before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an error
    #[error("Request failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) if status == reqwest::StatusCode::NOT_FOUND => {
                BackendError::NotFound(err.to_string())
            }
            Some(status)
                if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN =>
            {
                BackendError::Unauthorized(err.to_string())
            }
            Some(_) => BackendError::Failed(err.to_string()),
            None => BackendError::Network(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
