use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use mockall::Sequence;
use rstest::*;

use crate::board::{ActionRequest, BoardSettings, JobBoard, LoadingRegion, RefreshOutcome};
use crate::core::client::auth::AuthError;
use crate::core::client::job_api::{JobApiError, MockJobApi};
use crate::error::validation::DenialReason;
use crate::error::{JobHubError, ValidationError};
use crate::forms::JobDraft;
use crate::tests::common::scripted_api::ScriptedJobApi;
use crate::tests::common::{actor, admin, job, list_result, owner, seeker, session_for, OTHER_SEEKER_ID, SEEKER_ID};
use crate::types::actor::Actor;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::requests::MessageResponse;
use crate::types::jobs::types::{JobAction, JobStatus, ViewRole};
use crate::types::list::{ListQuery, ListResult};

const JOB_ID: &str = "job-1";

fn acknowledged(message: &str) -> Result<MessageResponse, JobApiError> {
    Ok(MessageResponse { message: message.to_string() })
}

fn conflict() -> JobApiError {
    JobApiError::Conflict { operation: "claim_job".to_string(), message: "Job already claimed".to_string() }
}

fn listing(jobs: Vec<Job>) -> impl FnMut(ViewRole, &ListQuery) -> Result<ListResult, JobApiError> + Send + 'static {
    move |_, _| {
        let total = jobs.len();
        Ok(list_result(jobs.clone(), 0, total))
    }
}

async fn board_with(api: MockJobApi, actor: Actor, role: ViewRole) -> JobBoard {
    JobBoard::new(Arc::new(api), session_for(actor, role).await, BoardSettings::default())
}

#[rstest]
#[tokio::test]
async fn successful_claim_reloads_the_board(seeker: Actor) {
    let mut api = MockJobApi::new();
    let mut seq = Sequence::new();
    api.expect_list_jobs().times(1).in_sequence(&mut seq).returning(listing(vec![job(JOB_ID, JobStatus::Open)]));
    api.expect_claim_job()
        .withf(|job_id| job_id == JOB_ID)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| acknowledged("Job claimed"));
    api.expect_list_jobs().times(1).in_sequence(&mut seq).returning(listing(vec![job(JOB_ID, JobStatus::Claimed)]));

    let board = board_with(api, seeker, ViewRole::JobSeeker).await;
    assert_eq!(board.refresh().await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(board.actions_for(&board.snapshot().await.jobs[0]), vec![JobAction::Claim]);

    let outcome = board.perform(JOB_ID, ActionRequest::Claim).await.unwrap();
    assert_eq!(outcome.action, JobAction::Claim);
    assert_eq!(outcome.message, "Job claimed");

    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.jobs[0].status, JobStatus::Claimed);
    assert_eq!(board.actions_for(&snapshot.jobs[0]), vec![JobAction::Submit]);
    assert!(!board.is_loading(LoadingRegion::Action));
    assert!(!board.is_loading(LoadingRegion::JobList));
}

#[rstest]
#[tokio::test]
async fn accepted_claim_stands_when_the_reload_fails(seeker: Actor) {
    let mut api = MockJobApi::new();
    let mut seq = Sequence::new();
    api.expect_list_jobs().times(1).in_sequence(&mut seq).returning(listing(vec![job(JOB_ID, JobStatus::Open)]));
    api.expect_claim_job().times(1).in_sequence(&mut seq).returning(|_| acknowledged("Job claimed"));
    api.expect_list_jobs()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(JobApiError::Timeout { operation: "list_jobs".to_string() }));

    let board = board_with(api, seeker, ViewRole::JobSeeker).await;
    board.refresh().await.unwrap();

    let outcome = board.perform(JOB_ID, ActionRequest::Claim).await.unwrap();
    assert_eq!(outcome.message, "Job claimed");
    assert_eq!(board.snapshot().await.jobs[0].status, JobStatus::Open);
    assert!(!board.is_loading(LoadingRegion::JobList));
}

#[rstest]
#[tokio::test]
async fn created_job_is_returned_when_the_reload_fails(owner: Actor) {
    let mut api = MockJobApi::new();
    api.expect_create_job().times(1).returning(|request| {
        let mut created = job("job-new", JobStatus::Open);
        created.name = request.name.clone();
        Ok(created)
    });
    api.expect_list_jobs()
        .times(1)
        .returning(|_, _| Err(JobApiError::NetworkError { operation: "list_jobs".to_string(), message: "reset".to_string() }));

    let board = board_with(api, owner, ViewRole::JobOwner).await;
    let now = Utc::now();
    let draft = JobDraft {
        name: "Mow the lawn".to_string(),
        description: "Front and back".to_string(),
        category_id: Some("cat-1".to_string()),
        pay_amount: 40.0,
        complete_by: now + ChronoDuration::hours(3),
        expires_at: now + ChronoDuration::days(2),
    };

    let created = board.create_job(draft).await.unwrap();
    assert_eq!(created.job_id, "job-new");
    assert_eq!(created.name, "Mow the lawn");
}

#[rstest]
#[tokio::test]
async fn lost_claim_race_reloads_and_reports_conflict() {
    let mut api = MockJobApi::new();
    let mut seq = Sequence::new();
    api.expect_list_jobs().times(1).in_sequence(&mut seq).returning(listing(vec![job(JOB_ID, JobStatus::Open)]));
    api.expect_claim_job().times(1).in_sequence(&mut seq).returning(|_| Err(conflict()));
    api.expect_list_jobs().times(1).in_sequence(&mut seq).returning(listing(vec![job(JOB_ID, JobStatus::Claimed)]));

    let board = board_with(api, actor(OTHER_SEEKER_ID, &[]), ViewRole::JobSeeker).await;
    board.refresh().await.unwrap();

    let err = board.perform(JOB_ID, ActionRequest::Claim).await.unwrap_err();
    assert!(matches!(err, JobHubError::JobApi(JobApiError::Conflict { .. })));

    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.jobs[0].status, JobStatus::Claimed);
    assert!(board.actions_for(&snapshot.jobs[0]).is_empty());
}

#[rstest]
#[tokio::test]
async fn forbidden_action_also_reloads(owner: Actor) {
    let mut api = MockJobApi::new();
    api.expect_list_jobs().times(2).returning(listing(vec![job(JOB_ID, JobStatus::Submitted)]));
    api.expect_approve_job().times(1).returning(|_, _| {
        Err(JobApiError::Forbidden { operation: "approve_job".to_string(), message: "not yours".to_string() })
    });

    let board = board_with(api, owner, ViewRole::JobOwner).await;
    board.refresh().await.unwrap();

    let err = board.perform(JOB_ID, ActionRequest::Approve { message: "ok".to_string() }).await.unwrap_err();
    assert!(matches!(err, JobHubError::JobApi(JobApiError::Forbidden { .. })));
}

#[rstest]
#[tokio::test]
async fn transport_failure_keeps_the_board_as_is(seeker: Actor) {
    let mut api = MockJobApi::new();
    api.expect_list_jobs().times(1).returning(listing(vec![job(JOB_ID, JobStatus::Open)]));
    api.expect_claim_job().times(1).returning(|_| {
        Err(JobApiError::NetworkError { operation: "claim_job".to_string(), message: "connection reset".to_string() })
    });

    let board = board_with(api, seeker, ViewRole::JobSeeker).await;
    board.refresh().await.unwrap();

    let err = board.perform(JOB_ID, ActionRequest::Claim).await.unwrap_err();
    assert!(err.as_api_error().is_some_and(JobApiError::is_retryable));
    assert_eq!(board.snapshot().await.jobs[0].status, JobStatus::Open);
}

#[rstest]
#[tokio::test]
async fn disallowed_action_never_reaches_the_api(owner: Actor) {
    let mut api = MockJobApi::new();
    api.expect_list_jobs().times(1).returning(listing(vec![job(JOB_ID, JobStatus::Claimed)]));
    api.expect_delete_job().never();

    let board = board_with(api, owner, ViewRole::JobOwner).await;
    board.refresh().await.unwrap();

    let err = board.perform(JOB_ID, ActionRequest::Delete).await.unwrap_err();
    match err {
        JobHubError::Validation(ValidationError::ActionNotAllowed { action, reason, .. }) => {
            assert_eq!(action, JobAction::Delete);
            assert_eq!(reason, DenialReason::WrongStatus);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = board.perform("missing", ActionRequest::Delete).await.unwrap_err();
    assert!(matches!(err, JobHubError::Validation(ValidationError::UnknownJob { .. })));
}

#[rstest]
#[tokio::test]
async fn blank_submission_message_is_omitted(seeker: Actor) {
    let mut api = MockJobApi::new();
    api.expect_list_jobs().times(2).returning(listing(vec![job(JOB_ID, JobStatus::Claimed)]));
    api.expect_submit_job()
        .withf(|job_id, message| job_id == JOB_ID && message.is_none())
        .times(1)
        .returning(|_, _| acknowledged("Job submitted"));

    let board = board_with(api, seeker, ViewRole::JobSeeker).await;
    board.refresh().await.unwrap();
    board.perform(JOB_ID, ActionRequest::Submit { message: Some("   ".to_string()) }).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn admin_deletes_through_the_admin_route(admin: Actor) {
    let mut api = MockJobApi::new();
    api.expect_list_jobs().times(2).returning(listing(vec![job(JOB_ID, JobStatus::Open)]));
    api.expect_delete_job()
        .withf(|role, job_id| *role == ViewRole::Admin && job_id == JOB_ID)
        .times(1)
        .returning(|_, _| acknowledged("Job deleted"));

    let board = board_with(api, admin, ViewRole::Admin).await;
    board.refresh().await.unwrap();
    assert_eq!(board.actions_for(&board.snapshot().await.jobs[0]), vec![JobAction::Delete]);
    board.perform(JOB_ID, ActionRequest::Delete).await.unwrap();
}

#[rstest]
#[tokio::test]
async fn statistics_need_the_admin_view(seeker: Actor) {
    let board = board_with(MockJobApi::new(), seeker, ViewRole::JobSeeker).await;

    let err = board.load_statistics().await.unwrap_err();
    assert!(matches!(err, JobHubError::Auth(AuthError::RoleNotPermitted { .. })));
}

#[tokio::test(start_paused = true)]
async fn second_request_for_the_same_job_is_refused_while_pending() {
    let api = Arc::new(ScriptedJobApi::default());
    api.push_listing(Duration::ZERO, Ok(list_result(vec![job(JOB_ID, JobStatus::Claimed)], 0, 1)));
    api.push_action(Duration::from_millis(100), acknowledged("Job submitted"));

    let board = JobBoard::new(api.clone(), session_for(seeker(), ViewRole::JobSeeker).await, BoardSettings::default());
    board.refresh().await.unwrap();

    let first = tokio::spawn({
        let board = board.clone();
        async move { board.perform(JOB_ID, ActionRequest::Submit { message: None }).await }
    });
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(board.is_loading(LoadingRegion::Action));

    let err = board.perform(JOB_ID, ActionRequest::Submit { message: None }).await.unwrap_err();
    assert!(matches!(err, JobHubError::Validation(ValidationError::RequestInFlight { .. })));

    first.await.unwrap().unwrap();
    assert_eq!(api.action_calls(), vec![JOB_ID.to_string()]);
    assert!(!board.is_loading(LoadingRegion::Action));
}

#[tokio::test(start_paused = true)]
async fn only_the_latest_query_updates_the_board() {
    let api = Arc::new(ScriptedJobApi::default());
    api.push_listing(Duration::from_millis(200), Ok(list_result(vec![job("stale", JobStatus::Open)], 0, 1)));
    api.push_listing(Duration::from_millis(10), Ok(list_result(vec![job("fresh", JobStatus::Open)], 0, 1)));

    let board = JobBoard::new(api.clone(), session_for(owner(), ViewRole::JobOwner).await, BoardSettings::default());

    let slow = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(board.refresh().await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(slow.await.unwrap().unwrap(), RefreshOutcome::Discarded);

    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.jobs.len(), 1);
    assert_eq!(snapshot.jobs[0].job_id, "fresh");
    assert!(!board.is_loading(LoadingRegion::JobList));
}

#[tokio::test(start_paused = true)]
async fn responses_after_teardown_are_dropped() {
    let api = Arc::new(ScriptedJobApi::default());
    api.push_listing(Duration::from_millis(200), Ok(list_result(vec![job("late", JobStatus::Open)], 0, 1)));

    let board = JobBoard::new(api.clone(), session_for(owner(), ViewRole::JobOwner).await, BoardSettings::default());
    let pending = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(1)).await;

    board.teardown().await;
    assert_eq!(pending.await.unwrap().unwrap(), RefreshOutcome::Discarded);
    assert!(board.snapshot().await.jobs.is_empty());
    assert!(matches!(board.refresh().await, Err(JobHubError::Auth(AuthError::SessionClosed))));
}

#[tokio::test]
async fn filter_changes_return_to_the_first_page() {
    let api = Arc::new(ScriptedJobApi::default());
    for _ in 0..3 {
        api.push_listing(Duration::ZERO, Ok(list_result(vec![job(JOB_ID, JobStatus::Open)], 0, 30)));
    }

    let board = JobBoard::new(api.clone(), session_for(seeker(), ViewRole::JobSeeker).await, BoardSettings::default());
    board.refresh().await.unwrap();
    assert_eq!(board.snapshot().await.total_pages, 4);

    assert_eq!(board.change_page(3).await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(board.change_page(9).await.unwrap(), RefreshOutcome::Unchanged);
    assert_eq!(board.set_category("c2").await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(board.set_category("c2").await.unwrap(), RefreshOutcome::Unchanged);

    let queries = api.queries();
    assert_eq!(queries.iter().map(|q| q.offset).collect::<Vec<_>>(), vec![0, 18, 0]);
    assert_eq!(queries[2].category.as_deref(), Some("c2"));
    assert_eq!(board.snapshot().await.page.current_page, 1);
}

#[tokio::test]
async fn seeker_board_starts_on_the_preferred_category() {
    let mut preferring = actor(SEEKER_ID, &[]);
    preferring.attributes.job_preferences = Some(vec!["gardening".to_string(), "plumbing".to_string()]);

    let api = Arc::new(ScriptedJobApi::default());
    let board = JobBoard::new(api.clone(), session_for(preferring.clone(), ViewRole::JobSeeker).await, BoardSettings::default());
    board.refresh().await.unwrap();
    assert_eq!(api.queries()[0].category.as_deref(), Some("gardening"));

    let api = Arc::new(ScriptedJobApi::default());
    let board = JobBoard::new(api.clone(), session_for(preferring, ViewRole::JobOwner).await, BoardSettings::default());
    board.refresh().await.unwrap();
    assert_eq!(api.queries()[0].category, None);
}

#[tokio::test(start_paused = true)]
async fn debounced_search_issues_a_single_query() {
    let api = Arc::new(ScriptedJobApi::default());
    let board = JobBoard::new(api.clone(), session_for(seeker(), ViewRole::JobSeeker).await, BoardSettings::default());

    let input = board.attach_search().await;
    for raw in ["p", "pl", "plu"] {
        input.push(raw);
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    let queries = api.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].search.as_deref(), Some("plu"));
    board.teardown().await;
}

#[tokio::test(start_paused = true)]
async fn newer_search_term_supersedes_a_slow_listing() {
    let api = Arc::new(ScriptedJobApi::default());
    api.push_listing(Duration::from_millis(2000), Ok(list_result(vec![job("stale", JobStatus::Open)], 0, 1)));
    api.push_listing(Duration::from_millis(10), Ok(list_result(vec![job("fresh", JobStatus::Open)], 0, 1)));
    let board = JobBoard::new(api.clone(), session_for(seeker(), ViewRole::JobSeeker).await, BoardSettings::default());

    let input = board.attach_search().await;
    input.push("pl");
    tokio::time::sleep(Duration::from_millis(400)).await;
    input.push("plumbing");
    tokio::time::sleep(Duration::from_millis(400)).await;

    let searches: Vec<_> = api.queries().into_iter().map(|query| query.search).collect();
    assert_eq!(searches, vec![Some("pl".to_string()), Some("plumbing".to_string())]);
    assert_eq!(board.snapshot().await.jobs[0].job_id, "fresh");

    tokio::time::sleep(Duration::from_millis(2000)).await;
    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.filter.search, "plumbing");
    assert_eq!(snapshot.jobs[0].job_id, "fresh");
    assert!(!board.is_loading(LoadingRegion::JobList));
    board.teardown().await;
}
