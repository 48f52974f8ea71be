use serde::{Deserialize, Serialize};

#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum JobStatus {
    /// Posted by its owner and waiting for a seeker to claim it
    Open,
    /// Reserved by a seeker who is working on it
    Claimed,
    /// The claimer declared the work done; waiting for the owner's review
    Submitted,
    /// The owner accepted the submission
    Approved,
    /// The owner turned the submission down
    Rejected,
}

/// What happens to a job when an action is applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    MovesTo(JobStatus),
    /// The job keeps its status (edits).
    Unchanged,
    /// The job is deleted.
    Removed,
}

impl JobStatus {
    /// No action is offered on a terminal job.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Approved | JobStatus::Rejected)
    }

    /// Every status past `open` carries a claimer.
    pub fn requires_claimer(&self) -> bool {
        !matches!(self, JobStatus::Open)
    }

    /// Transition table of the job lifecycle. `None` means the action is illegal in this status.
    pub fn next(&self, action: JobAction) -> Option<TransitionOutcome> {
        use JobAction::*;
        use JobStatus::*;

        match (self, action) {
            (Open, Claim) => Some(TransitionOutcome::MovesTo(Claimed)),
            (Claimed, Submit) => Some(TransitionOutcome::MovesTo(Submitted)),
            (Submitted, Approve) => Some(TransitionOutcome::MovesTo(Approved)),
            (Submitted, Reject) => Some(TransitionOutcome::MovesTo(Rejected)),
            (Open, Edit) => Some(TransitionOutcome::Unchanged),
            (Open, Delete) => Some(TransitionOutcome::Removed),
            _ => None,
        }
    }
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobAction {
    Claim,
    Submit,
    Approve,
    Reject,
    Edit,
    Delete,
}

/// The view an actor is using. Decides which predicates apply, never stored on a job.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum ViewRole {
    #[strum(to_string = "seeker", serialize = "jobSeeker")]
    #[value(name = "seeker")]
    JobSeeker,
    #[strum(to_string = "owner", serialize = "jobOwner")]
    #[value(name = "owner")]
    JobOwner,
    #[strum(to_string = "admin")]
    #[value(name = "admin")]
    Admin,
}
