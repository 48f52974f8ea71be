use jobhub_utils::http_client::HttpClientError;
use reqwest::StatusCode;

/// How a board reacts to a failed Job API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Reload the list so the view shows the server's state.
    Refresh,
    /// Leave the view as is; the user may try again.
    RetryByUser,
    /// The session is no longer valid.
    Reauthenticate,
    None,
}

#[derive(Debug, thiserror::Error)]
pub enum JobApiError {
    /// 409: another actor won the race (claim) or the job moved on.
    #[error("Conflict during {operation}: {message}")]
    Conflict { operation: String, message: String },

    /// 403: the server disagrees with the local predicates.
    #[error("Forbidden during {operation}: {message}")]
    Forbidden { operation: String, message: String },

    /// 401
    #[error("Unauthenticated during {operation}: {message}")]
    Unauthenticated { operation: String, message: String },

    /// 404
    #[error("Not found during {operation}: {message}")]
    NotFound { operation: String, message: String },

    /// Any other non-success status
    #[error("Job API error during {operation} (status {status}): {message}")]
    ApiError { operation: String, status: StatusCode, message: String },

    /// Transport errors (connection refused, reset, incomplete message)
    #[error("Network error during {operation}: {message}")]
    NetworkError { operation: String, message: String },

    #[error("Request timed out during {operation}")]
    Timeout { operation: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse response during {operation}: {message}")]
    ParseError { operation: String, message: String },

    /// Request could not be assembled
    #[error("Failed to build request for {operation}: {message}")]
    UrlError { operation: String, message: String },
}

impl JobApiError {
    /// Network and timeout failures are offered for a manual retry. Nothing is retried automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, JobApiError::NetworkError { .. } | JobApiError::Timeout { .. })
    }

    pub fn recovery(&self) -> Recovery {
        match self {
            JobApiError::Conflict { .. } | JobApiError::Forbidden { .. } | JobApiError::NotFound { .. } => {
                Recovery::Refresh
            }
            JobApiError::NetworkError { .. } | JobApiError::Timeout { .. } => Recovery::RetryByUser,
            JobApiError::Unauthenticated { .. } => Recovery::Reauthenticate,
            JobApiError::ApiError { .. } | JobApiError::ParseError { .. } | JobApiError::UrlError { .. } => {
                Recovery::None
            }
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            JobApiError::Conflict { .. } => "conflict",
            JobApiError::Forbidden { .. } => "forbidden",
            JobApiError::Unauthenticated { .. } => "unauthenticated",
            JobApiError::NotFound { .. } => "not_found",
            JobApiError::ApiError { .. } => "api_error",
            JobApiError::NetworkError { .. } => "network_error",
            JobApiError::Timeout { .. } => "timeout",
            JobApiError::ParseError { .. } => "parse_error",
            JobApiError::UrlError { .. } => "url_error",
        }
    }

    /// Maps a non-success response status to its error variant.
    pub fn from_status(operation: impl Into<String>, status: StatusCode, message: impl Into<String>) -> Self {
        let operation = operation.into();
        let message = message.into();
        match status {
            StatusCode::CONFLICT => JobApiError::Conflict { operation, message },
            StatusCode::FORBIDDEN => JobApiError::Forbidden { operation, message },
            StatusCode::UNAUTHORIZED => JobApiError::Unauthenticated { operation, message },
            StatusCode::NOT_FOUND => JobApiError::NotFound { operation, message },
            _ => JobApiError::ApiError { operation, status, message },
        }
    }

    pub fn from_reqwest_error(operation: impl Into<String>, source: reqwest::Error) -> Self {
        let operation = operation.into();

        if source.is_timeout() {
            JobApiError::Timeout { operation }
        } else if source.is_decode() {
            JobApiError::ParseError { operation, message: source.to_string() }
        } else if let Some(status) = source.status() {
            JobApiError::from_status(operation, status, source.to_string())
        } else if source.is_connect() {
            JobApiError::NetworkError { operation, message: format!("connection failed: {}", source) }
        } else {
            let error_msg = source.to_string();
            let message = if error_msg.contains("IncompleteMessage") {
                "incomplete message received from server".to_string()
            } else if error_msg.contains("Canceled") {
                "request was canceled".to_string()
            } else {
                format!("request failed: {}", error_msg)
            };
            JobApiError::NetworkError { operation, message }
        }
    }

    pub fn from_http_client_error(operation: impl Into<String>, source: HttpClientError) -> Self {
        match source {
            HttpClientError::Request(e) => Self::from_reqwest_error(operation, e),
            other => JobApiError::UrlError { operation: operation.into(), message: other.to_string() },
        }
    }

    pub fn parse_error(operation: impl Into<String>, message: impl Into<String>) -> Self {
        JobApiError::ParseError { operation: operation.into(), message: message.into() }
    }
}
