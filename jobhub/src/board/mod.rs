//! One view's job board.
//!
//! A [`JobBoard`] ties a [`Session`] to the [`JobApi`]: it owns the filter and page state, issues
//! list queries with switch-to-latest semantics, tracks loading per region and dispatches
//! transitions only after the lifecycle predicates allow them. Every successful transition is
//! followed by a full reload; nothing is patched locally.

pub mod loading;
pub mod state;

use std::collections::HashSet;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::core::client::auth::{AuthError, AuthProvider};
use crate::core::client::job_api::error::Recovery;
use crate::core::client::job_api::{JobApi, JobApiError};
use crate::core::session::Session;
use crate::error::{JobHubError, JobHubResult, ValidationError};
use crate::forms::JobDraft;
use crate::lifecycle::actions::{ensure_allowed, resulting_status};
use crate::lifecycle::available_actions;
use crate::query::debounce::{debounced_search, SearchInput, DEFAULT_SEARCH_DEBOUNCE};
use crate::query::{FilterState, PageState, DEFAULT_ITEMS_PER_PAGE};
use crate::types::category::Category;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::{JobAction, JobStatus, ViewRole};
use crate::types::list::{ListResult, SortKey};
use crate::types::statistics::AdminStatistics;
pub use loading::{LoadingGuard, LoadingRegion, LoadingRegions};
pub use state::BoardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    pub items_per_page: usize,
    pub search_debounce: Duration,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self { items_per_page: DEFAULT_ITEMS_PER_PAGE, search_debounce: DEFAULT_SEARCH_DEBOUNCE }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The result became the board's content.
    Applied,
    /// A newer query was issued or the board closed before the response arrived.
    Discarded,
    /// Nothing changed, so no query was sent.
    Unchanged,
}

/// A transition requested from the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Claim,
    Submit { message: Option<String> },
    Approve { message: String },
    Reject { message: String },
    Delete,
}

impl ActionRequest {
    pub fn action(&self) -> JobAction {
        match self {
            ActionRequest::Claim => JobAction::Claim,
            ActionRequest::Submit { .. } => JobAction::Submit,
            ActionRequest::Approve { .. } => JobAction::Approve,
            ActionRequest::Reject { .. } => JobAction::Reject,
            ActionRequest::Delete => JobAction::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub job_id: String,
    pub action: JobAction,
    /// Server acknowledgement
    pub message: String,
}

/// Point-in-time copy of a board for rendering.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub role: ViewRole,
    pub filter: FilterState,
    pub page: PageState,
    pub jobs: Vec<Job>,
    pub total: usize,
    pub total_pages: usize,
    pub has_more: bool,
    pub is_empty: bool,
    pub categories: Vec<Category>,
}

/// Job ids with a transition request in flight.
#[derive(Debug, Default)]
struct InFlight {
    jobs: StdMutex<HashSet<String>>,
}

impl InFlight {
    fn acquire(self: &Arc<Self>, job_id: &str) -> Result<InFlightGuard, ValidationError> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if !jobs.insert(job_id.to_string()) {
            return Err(ValidationError::RequestInFlight { job_id: job_id.to_string() });
        }
        Ok(InFlightGuard { in_flight: Arc::clone(self), job_id: job_id.to_string() })
    }
}

struct InFlightGuard {
    in_flight: Arc<InFlight>,
    job_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut jobs = self.in_flight.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        jobs.remove(&self.job_id);
    }
}

#[derive(Clone)]
pub struct JobBoard {
    api: Arc<dyn JobApi>,
    session: Arc<Session>,
    settings: BoardSettings,
    state: Arc<Mutex<BoardState>>,
    loading: Arc<LoadingRegions>,
    in_flight: Arc<InFlight>,
}

impl JobBoard {
    /// Creates a board for an initialized session. A seeker board starts filtered on the actor's
    /// first preferred category.
    pub fn new(api: Arc<dyn JobApi>, session: Arc<Session>, settings: BoardSettings) -> Self {
        let mut filter = FilterState::default();
        if session.role() == ViewRole::JobSeeker {
            if let Some(category) = session.actor().preferred_category() {
                filter.category = category.to_string();
            }
        }

        Self {
            api,
            state: Arc::new(Mutex::new(BoardState::new(settings.items_per_page, filter))),
            session,
            settings,
            loading: Arc::new(LoadingRegions::default()),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Resolves the session for `role` and opens a board on it.
    pub async fn open(
        api: Arc<dyn JobApi>,
        provider: &dyn AuthProvider,
        role: ViewRole,
        settings: BoardSettings,
    ) -> JobHubResult<Self> {
        let session = Session::init(provider, role).await?;
        Ok(Self::new(api, Arc::new(session), settings))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> ViewRole {
        self.session.role()
    }

    pub fn is_loading(&self, region: LoadingRegion) -> bool {
        self.loading.is_loading(region)
    }

    pub async fn snapshot(&self) -> BoardSnapshot {
        let state = self.state.lock().await;
        BoardSnapshot {
            role: self.role(),
            filter: state.filter().clone(),
            page: *state.page(),
            jobs: state.jobs().to_vec(),
            total: state.total(),
            total_pages: state.total_pages(),
            has_more: state.has_more(),
            is_empty: state.is_empty_state(),
            categories: state.categories().to_vec(),
        }
    }

    /// Actions the current actor may request on `job` right now.
    pub fn actions_for(&self, job: &Job) -> Vec<JobAction> {
        available_actions(job, self.session.actor(), self.role(), Utc::now())
    }

    /// Issues the query for the current state. Only the latest issued query may update the board.
    #[instrument(skip(self), fields(role = %self.role()))]
    pub async fn refresh(&self) -> JobHubResult<RefreshOutcome> {
        self.session.ensure_active()?;
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            if state.is_closed() {
                return Err(JobHubError::BoardClosed);
            }
            state.begin_query()
        };

        let _loading = self.loading.begin(LoadingRegion::JobList);
        let shutdown = self.session.shutdown_token();
        let response = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!(generation = ticket.generation(), "Board torn down while listing, dropping response");
                return Ok(RefreshOutcome::Discarded);
            }
            response = self.api.list_jobs(self.role(), &query) => response,
        };

        let mut state = self.state.lock().await;
        if !state.is_current(ticket) {
            debug!(generation = ticket.generation(), "Discarding stale listing response");
            return Ok(RefreshOutcome::Discarded);
        }

        let result = response?;
        self.inspect_result(&result);
        state.apply_result(ticket, result);
        debug!(total = state.total(), page = state.page().current_page, "Listing applied");
        Ok(RefreshOutcome::Applied)
    }

    /// Logs what the client cannot repair: jobs breaking the claimer invariant and listings
    /// resolved for a different identity than the session's.
    fn inspect_result(&self, result: &ListResult) {
        let actor_id = &self.session.actor().id;
        if let Some(viewer_id) = result.viewer_id() {
            if viewer_id != actor_id {
                warn!(viewer_id = %viewer_id, actor_id = %actor_id, "Listing was resolved for another identity");
            }
        }
        for job in result.jobs.iter().filter(|job| !job.claimer_invariant_holds()) {
            warn!(
                job_id = %job.job_id,
                status = %job.status,
                claimer_id = ?job.claimer_id,
                "Job violates the claimer invariant"
            );
        }
    }

    async fn refresh_if(&self, changed: bool) -> JobHubResult<RefreshOutcome> {
        if changed {
            self.refresh().await
        } else {
            Ok(RefreshOutcome::Unchanged)
        }
    }

    pub async fn set_search(&self, term: &str) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.set_search(term);
        self.refresh_if(changed).await
    }

    pub async fn set_category(&self, category: &str) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.set_category(category);
        self.refresh_if(changed).await
    }

    pub async fn set_status(&self, status: Option<JobStatus>) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.set_status(status);
        self.refresh_if(changed).await
    }

    pub async fn set_sort(&self, sort: SortKey) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.set_sort(sort);
        self.refresh_if(changed).await
    }

    pub async fn set_filters(&self, filter: FilterState) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.replace_filter(filter);
        self.refresh_if(changed).await
    }

    pub async fn clear_filters(&self) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.clear_filters();
        self.refresh_if(changed).await
    }

    /// Pages outside `1..=totalPages` are ignored.
    pub async fn change_page(&self, page: usize) -> JobHubResult<RefreshOutcome> {
        let changed = self.state.lock().await.change_page(page);
        self.refresh_if(changed).await
    }

    /// Connects a debounced search input to this board. Each effective term updates the search
    /// filter at once and its listing runs in the background, so a newer term supersedes a
    /// listing still in flight. The listener stops on teardown or when every input handle is
    /// dropped.
    pub async fn attach_search(&self) -> SearchInput {
        let current = self.state.lock().await.filter().search.clone();
        let (input, mut terms) = debounced_search(self.settings.search_debounce, current);
        let board = self.clone();
        let shutdown = self.session.shutdown_token();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    term = terms.next() => match term {
                        Some(term) => {
                            if board.state.lock().await.set_search(&term) {
                                board.spawn_search_refresh(term, shutdown.clone());
                            }
                        }
                        None => break,
                    },
                }
            }
            debug!("Search listener stopped");
        });

        input
    }

    fn spawn_search_refresh(&self, term: String, shutdown: CancellationToken) {
        let board = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                result = board.refresh() => {
                    if let Err(e) = result {
                        warn!(error = %e, search = %term, "Search refresh failed");
                    }
                }
            }
        });
    }

    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> JobHubResult<Vec<Category>> {
        self.session.ensure_active()?;
        let _loading = self.loading.begin(LoadingRegion::Categories);
        let response = self.api.get_categories().await?;
        if response.count != response.categories.len() {
            debug!(count = response.count, returned = response.categories.len(), "Category count mismatch");
        }
        self.state.lock().await.set_categories(response.categories.clone());
        Ok(response.categories)
    }

    #[instrument(skip(self))]
    pub async fn load_statistics(&self) -> JobHubResult<AdminStatistics> {
        self.session.ensure_active()?;
        if self.role() != ViewRole::Admin {
            return Err(AuthError::RoleNotPermitted {
                actor_id: self.session.actor().id.clone(),
                role: self.role().to_string(),
            }
            .into());
        }
        let _loading = self.loading.begin(LoadingRegion::Statistics);
        let statistics = self.api.get_admin_statistics().await?;
        self.state.lock().await.set_statistics(statistics.clone());
        Ok(statistics)
    }

    /// Finds `job_id`, starting with the current page and then walking the listing page by page.
    /// The board is left on the page where the job was found.
    pub async fn locate(&self, job_id: &str) -> JobHubResult<Option<Job>> {
        if let Some(job) = self.state.lock().await.find_job(job_id).cloned() {
            return Ok(Some(job));
        }

        let mut page = 1;
        loop {
            {
                let mut state = self.state.lock().await;
                if state.page().current_page != page && !state.change_page(page) {
                    return Ok(None);
                }
            }
            if self.refresh().await? == RefreshOutcome::Discarded {
                return Ok(None);
            }

            let state = self.state.lock().await;
            if let Some(job) = state.find_job(job_id).cloned() {
                return Ok(Some(job));
            }
            if !state.has_more() || page >= state.total_pages() {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn job_on_board(&self, job_id: &str) -> Result<Job, ValidationError> {
        self.state
            .lock()
            .await
            .find_job(job_id)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownJob { job_id: job_id.to_string() })
    }

    /// Requests a transition on a job currently on the board.
    ///
    /// The lifecycle predicates are checked first and a second request for the same job is refused
    /// while one is pending. Conflicts and forbidden responses reload the board before the error is
    /// returned; transport failures leave it untouched.
    #[instrument(skip(self, request), fields(role = %self.role(), action = %request.action()))]
    pub async fn perform(&self, job_id: &str, request: ActionRequest) -> JobHubResult<ActionOutcome> {
        self.session.ensure_active()?;
        let action = request.action();
        let job = self.job_on_board(job_id).await?;
        ensure_allowed(&job, action, &self.session.action_context(Utc::now()))?;

        let _in_flight = self.in_flight.acquire(job_id)?;
        let result = {
            let _loading = self.loading.begin(LoadingRegion::Action);
            match request {
                ActionRequest::Claim => self.api.claim_job(job_id).await,
                ActionRequest::Submit { message } => {
                    let message = message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
                    self.api.submit_job(job_id, message).await
                }
                ActionRequest::Approve { message } => self.api.approve_job(job_id, message.trim().to_string()).await,
                ActionRequest::Reject { message } => self.api.reject_job(job_id, message.trim().to_string()).await,
                ActionRequest::Delete => self.api.delete_job(self.role(), job_id).await,
            }
        };

        match result {
            Ok(response) => {
                info!(
                    job_id = %job_id,
                    from = %job.status,
                    to = ?resulting_status(&job, action),
                    "Transition accepted"
                );
                self.reload_after_accepted(job_id).await;
                Ok(ActionOutcome { job_id: job_id.to_string(), action, message: response.message })
            }
            Err(e) => Err(self.handle_action_error(job_id, action, e).await),
        }
    }

    /// Reloads after the server accepted a change. The change stands even when the reload fails,
    /// so the failure is only logged.
    async fn reload_after_accepted(&self, job_id: &str) {
        if let Err(e) = self.refresh().await {
            warn!(job_id = %job_id, error = %e, "Change accepted but the reload failed");
        }
    }

    async fn handle_action_error(&self, job_id: &str, action: JobAction, e: JobApiError) -> JobHubError {
        match &e {
            JobApiError::Forbidden { .. } => {
                error!(job_id = %job_id, action = %action, error = %e, "Server refused an action the predicates allowed");
            }
            JobApiError::Conflict { .. } => {
                info!(job_id = %job_id, action = %action, error = %e, "Job changed on the server, reloading");
            }
            _ => {
                warn!(job_id = %job_id, action = %action, error = %e, error_type = e.error_type(), "Transition failed");
            }
        }

        if e.recovery() == Recovery::Refresh {
            if let Err(refresh_error) = self.refresh().await {
                warn!(error = %refresh_error, "Reload after failed transition also failed");
            }
        }
        e.into()
    }

    /// Posts a new job from the owner view.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_job(&self, draft: JobDraft) -> JobHubResult<Job> {
        self.session.ensure_active()?;
        if self.role() != ViewRole::JobOwner {
            return Err(AuthError::RoleNotPermitted {
                actor_id: self.session.actor().id.clone(),
                role: self.role().to_string(),
            }
            .into());
        }
        let request = draft.into_create_request(Utc::now())?;

        let job = {
            let _loading = self.loading.begin(LoadingRegion::Action);
            self.api.create_job(&request).await?
        };
        info!(job_id = %job.job_id, "Job created");
        self.reload_after_accepted(&job.job_id).await;
        Ok(job)
    }

    /// Edits an open job owned by the actor.
    #[instrument(skip(self, draft))]
    pub async fn update_job(&self, job_id: &str, draft: JobDraft) -> JobHubResult<Job> {
        self.session.ensure_active()?;
        let now = Utc::now();
        let job = self.job_on_board(job_id).await?;
        ensure_allowed(&job, JobAction::Edit, &self.session.action_context(now))?;
        let request = draft.into_update_request(now)?;

        let _in_flight = self.in_flight.acquire(job_id)?;
        let result = {
            let _loading = self.loading.begin(LoadingRegion::Action);
            self.api.update_job(job_id, &request).await
        };

        match result {
            Ok(updated) => {
                info!(job_id = %job_id, "Job updated");
                self.reload_after_accepted(job_id).await;
                Ok(updated)
            }
            Err(e) => Err(self.handle_action_error(job_id, JobAction::Edit, e).await),
        }
    }

    /// Closes the board and its session. Responses arriving afterwards are discarded.
    pub async fn teardown(&self) {
        self.session.teardown();
        self.state.lock().await.close();
    }
}
