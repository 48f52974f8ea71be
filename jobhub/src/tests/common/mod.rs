pub mod scripted_api;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rstest::*;

use crate::core::client::auth::MockAuthProvider;
use crate::core::session::Session;
use crate::types::actor::{Actor, ActorAttributes, ADMIN_GROUP};
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::{JobStatus, ViewRole};
use crate::types::list::ListResult;

pub const OWNER_ID: &str = "owner-1";
pub const SEEKER_ID: &str = "seeker-1";
pub const OTHER_SEEKER_ID: &str = "seeker-2";
pub const ADMIN_ID: &str = "admin-1";

/// Boards evaluate predicates against the wall clock, so fixtures are built around it too.
#[fixture]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn actor(id: &str, groups: &[&str]) -> Actor {
    Actor {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        attributes: ActorAttributes::default(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
    }
}

#[fixture]
pub fn owner() -> Actor {
    actor(OWNER_ID, &[])
}

#[fixture]
pub fn seeker() -> Actor {
    actor(SEEKER_ID, &[])
}

#[fixture]
pub fn admin() -> Actor {
    actor(ADMIN_ID, &[ADMIN_GROUP])
}

/// A job owned by [`OWNER_ID`]; claimed states are claimed by [`SEEKER_ID`]. Expires a day after
/// [`now`].
pub fn job(job_id: &str, status: JobStatus) -> Job {
    let created_at = now() - Duration::days(1);
    Job {
        job_id: job_id.to_string(),
        owner_id: OWNER_ID.to_string(),
        claimer_id: status.requires_claimer().then(|| SEEKER_ID.to_string()),
        category_id: "c1".to_string(),
        name: format!("Job {}", job_id),
        description: "Sweep the yard".to_string(),
        pay_amount: 25.0,
        time_to_complete_seconds: 3600,
        expiry_date: now() + Duration::days(1),
        status,
        created_at,
        updated_at: None,
        claimed_at: None,
        submitted_at: None,
        submission_message: None,
        approval_message: None,
        rejection_message: None,
    }
}

/// Listing page as the server would return it for `offset`.
pub fn list_result(jobs: Vec<Job>, offset: usize, total: usize) -> ListResult {
    let has_more = offset + jobs.len() < total;
    ListResult { jobs, total, has_more, owner_id: None, seeker_id: None }
}

/// Initializes a session for `actor` through a mocked identity provider.
pub async fn session_for(actor: Actor, role: ViewRole) -> Arc<Session> {
    let mut provider = MockAuthProvider::new();
    provider.expect_current_actor().returning(move || Ok(actor.clone()));
    Arc::new(Session::init(&provider, role).await.expect("session should initialize"))
}
