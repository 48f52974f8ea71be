pub mod config;
pub mod validation;

use thiserror::Error;

pub use crate::core::client::auth::error::AuthError;
pub use crate::core::client::job_api::error::JobApiError;
pub use config::ConfigError;
pub use validation::ValidationError;

/// Result type for jobhub operations
pub type JobHubResult<T> = Result<T, JobHubError>;

/// Error types for the jobhub client
#[derive(Error, Debug)]
pub enum JobHubError {
    /// Rejected locally, no request was sent
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Job API error: {0}")]
    JobApi(#[from] JobApiError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The board was torn down while the operation was pending
    #[error("Board has been torn down")]
    BoardClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JobHubError {
    /// The Job API error behind this one, if any.
    pub fn as_api_error(&self) -> Option<&JobApiError> {
        match self {
            JobHubError::JobApi(e) => Some(e),
            _ => None,
        }
    }
}
