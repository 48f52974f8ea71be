//! Hand-written [`JobApi`] whose listing responses are scripted with per-call delays, used where
//! response ordering matters.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::client::job_api::{JobApi, JobApiError};
use crate::types::category::CategoriesResponse;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::requests::{CreateJobRequest, MessageResponse, UpdateJobRequest};
use crate::types::jobs::types::ViewRole;
use crate::types::list::{ListQuery, ListResult};
use crate::types::statistics::AdminStatistics;

#[derive(Default)]
pub struct ScriptedJobApi {
    listings: Mutex<VecDeque<(Duration, Result<ListResult, JobApiError>)>>,
    queries: Mutex<Vec<ListQuery>>,
    actions: Mutex<VecDeque<(Duration, Result<MessageResponse, JobApiError>)>>,
    action_calls: Mutex<Vec<String>>,
}

impl ScriptedJobApi {
    /// Queues the response of the next `list_jobs` call, delivered after `delay`.
    pub fn push_listing(&self, delay: Duration, result: Result<ListResult, JobApiError>) {
        self.listings.lock().unwrap().push_back((delay, result));
    }

    pub fn queries(&self) -> Vec<ListQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Queues the response of the next transition call (claim, submit, approve, reject or delete).
    pub fn push_action(&self, delay: Duration, result: Result<MessageResponse, JobApiError>) {
        self.actions.lock().unwrap().push_back((delay, result));
    }

    /// Job ids of every transition call, in order.
    pub fn action_calls(&self) -> Vec<String> {
        self.action_calls.lock().unwrap().clone()
    }

    async fn next_action(&self, operation: &str, job_id: &str) -> Result<MessageResponse, JobApiError> {
        self.action_calls.lock().unwrap().push(job_id.to_string());
        let next = self.actions.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Err(unscripted(operation)),
        }
    }
}

fn unscripted(operation: &str) -> JobApiError {
    JobApiError::UrlError { operation: operation.to_string(), message: "not scripted".to_string() }
}

#[async_trait]
impl JobApi for ScriptedJobApi {
    async fn list_jobs(&self, _role: ViewRole, query: &ListQuery) -> Result<ListResult, JobApiError> {
        self.queries.lock().unwrap().push(query.clone());
        let next = self.listings.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(ListResult::default()),
        }
    }

    async fn create_job(&self, _request: &CreateJobRequest) -> Result<Job, JobApiError> {
        Err(unscripted("create_job"))
    }

    async fn update_job(&self, _job_id: &str, _request: &UpdateJobRequest) -> Result<Job, JobApiError> {
        Err(unscripted("update_job"))
    }

    async fn claim_job(&self, job_id: &str) -> Result<MessageResponse, JobApiError> {
        self.next_action("claim_job", job_id).await
    }

    async fn submit_job(&self, job_id: &str, _message: Option<String>) -> Result<MessageResponse, JobApiError> {
        self.next_action("submit_job", job_id).await
    }

    async fn approve_job(&self, job_id: &str, _message: String) -> Result<MessageResponse, JobApiError> {
        self.next_action("approve_job", job_id).await
    }

    async fn reject_job(&self, job_id: &str, _message: String) -> Result<MessageResponse, JobApiError> {
        self.next_action("reject_job", job_id).await
    }

    async fn delete_job(&self, _role: ViewRole, job_id: &str) -> Result<MessageResponse, JobApiError> {
        self.next_action("delete_job", job_id).await
    }

    async fn get_categories(&self) -> Result<CategoriesResponse, JobApiError> {
        Ok(CategoriesResponse::default())
    }

    async fn get_admin_statistics(&self) -> Result<AdminStatistics, JobApiError> {
        Err(unscripted("get_admin_statistics"))
    }
}
