//! Job lifecycle authority.
//!
//! Pure predicates over `(job, actor, now)` deciding which transitions an actor may request.
//! The Job API stays authoritative: a `true` here only means the request is worth sending.

pub mod actions;

use chrono::{DateTime, Utc};

use crate::types::actor::Actor;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::JobStatus;

pub use actions::{available_actions, ensure_allowed, is_action_allowed, ActionContext};

pub fn is_owned_by_actor(job: &Job, actor: &Actor) -> bool {
    job.owner_id == actor.id
}

pub fn is_claimed_by_actor(job: &Job, actor: &Actor) -> bool {
    job.claimer_id.as_deref() == Some(actor.id.as_str())
}

/// Claiming is allowed strictly before `expiryDate`.
pub fn can_claim(job: &Job, now: DateTime<Utc>) -> bool {
    job.status == JobStatus::Open && job.expiry_date > now
}

pub fn can_submit(job: &Job, actor: &Actor) -> bool {
    is_claimed_by_actor(job, actor) && job.status == JobStatus::Claimed
}

/// Only open jobs can be edited or deleted. A claimed job is locked for its owner.
pub fn can_edit_or_delete(job: &Job, actor: &Actor) -> bool {
    is_owned_by_actor(job, actor) && job.status == JobStatus::Open
}

pub fn can_approve_or_reject(job: &Job, actor: &Actor) -> bool {
    is_owned_by_actor(job, actor) && job.status == JobStatus::Submitted
}
