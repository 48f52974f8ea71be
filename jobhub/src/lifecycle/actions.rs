use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;

use super::{is_claimed_by_actor, is_owned_by_actor};
use crate::error::validation::{DenialReason, ValidationError};
use crate::types::actor::Actor;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::{JobAction, JobStatus, TransitionOutcome, ViewRole};

/// Who is asking, in which view, and when.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    pub actor: &'a Actor,
    pub role: ViewRole,
    pub now: DateTime<Utc>,
}

impl<'a> ActionContext<'a> {
    pub fn new(actor: &'a Actor, role: ViewRole, now: DateTime<Utc>) -> Self {
        Self { actor, role, now }
    }
}

/// Decides a single action. The status gate comes from the transition table, then the role adds
/// its identity checks.
pub fn check_action(job: &Job, action: JobAction, ctx: &ActionContext<'_>) -> Result<(), DenialReason> {
    if !offered_in_role(ctx.role, action) {
        return Err(DenialReason::NotInRole);
    }
    if job.status.next(action).is_none() {
        return Err(DenialReason::WrongStatus);
    }

    match (ctx.role, action) {
        (ViewRole::JobSeeker, JobAction::Claim) => {
            if job.is_expired(ctx.now) {
                Err(DenialReason::Expired)
            } else if is_owned_by_actor(job, ctx.actor) {
                Err(DenialReason::OwnJob)
            } else {
                Ok(())
            }
        }
        (ViewRole::JobSeeker, JobAction::Submit) => {
            if is_claimed_by_actor(job, ctx.actor) {
                Ok(())
            } else {
                Err(DenialReason::NotClaimer)
            }
        }
        (ViewRole::JobOwner, _) => {
            if is_owned_by_actor(job, ctx.actor) {
                Ok(())
            } else {
                Err(DenialReason::NotOwner)
            }
        }
        // ownership is bypassed for admins, the status gate above still applies
        (ViewRole::Admin, _) => Ok(()),
        _ => Err(DenialReason::NotInRole),
    }
}

/// Actions each view can issue at all. Admins only have a delete endpoint, and it stays behind
/// the status gate like every other action: an admin deletes open jobs only. The admin console
/// of the web client offers delete in any status; this is deliberately tighter.
fn offered_in_role(role: ViewRole, action: JobAction) -> bool {
    match role {
        ViewRole::JobSeeker => matches!(action, JobAction::Claim | JobAction::Submit),
        ViewRole::JobOwner => {
            matches!(action, JobAction::Edit | JobAction::Delete | JobAction::Approve | JobAction::Reject)
        }
        ViewRole::Admin => matches!(action, JobAction::Delete),
    }
}

pub fn is_action_allowed(job: &Job, action: JobAction, ctx: &ActionContext<'_>) -> bool {
    check_action(job, action, ctx).is_ok()
}

/// Every action the actor may request on `job` in the given view.
pub fn available_actions(job: &Job, actor: &Actor, role: ViewRole, now: DateTime<Utc>) -> Vec<JobAction> {
    let ctx = ActionContext::new(actor, role, now);
    JobAction::iter().filter(|action| is_action_allowed(job, *action, &ctx)).collect()
}

pub fn ensure_allowed(job: &Job, action: JobAction, ctx: &ActionContext<'_>) -> Result<(), ValidationError> {
    check_action(job, action, ctx).map_err(|reason| ValidationError::ActionNotAllowed {
        action,
        job_id: job.job_id.clone(),
        role: ctx.role,
        reason,
    })
}

/// Status a successful action leads to, for messages. `None` when the job is removed or unchanged.
pub fn resulting_status(job: &Job, action: JobAction) -> Option<JobStatus> {
    match job.status.next(action)? {
        TransitionOutcome::MovesTo(status) => Some(status),
        _ => None,
    }
}
