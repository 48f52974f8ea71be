use crate::types::jobs::types::{JobAction, ViewRole};

/// Local rejections. Raised before any request reaches the Job API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Cannot {action} job {job_id} as {role}: {reason}")]
    ActionNotAllowed { action: JobAction, job_id: String, role: ViewRole, reason: DenialReason },

    /// Another request for the same job has not finished yet.
    #[error("A request for job {job_id} is already in flight")]
    RequestInFlight { job_id: String },

    #[error("Job {job_id} is not on the board")]
    UnknownJob { job_id: String },

    #[error("Invalid {field}: {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Why a predicate rejected an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DenialReason {
    #[strum(to_string = "the job is not in a status that allows it")]
    WrongStatus,
    #[strum(to_string = "the job has expired")]
    Expired,
    #[strum(to_string = "the job is not owned by the actor")]
    NotOwner,
    #[strum(to_string = "the job is not claimed by the actor")]
    NotClaimer,
    #[strum(to_string = "owners cannot claim their own jobs")]
    OwnJob,
    #[strum(to_string = "the action is not offered in this view")]
    NotInRole,
}

impl ValidationError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError::InvalidField { field, message: message.into() }
    }
}
