use std::time::Duration;

use async_trait::async_trait;
use jobhub_utils::http_client::{extract_http_error_text, HttpClient};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{JobApi, JobApiError};
use crate::types::category::CategoriesResponse;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::requests::{CreateJobRequest, MessageBody, MessageResponse, UpdateJobRequest};
use crate::types::jobs::types::ViewRole;
use crate::types::list::{ListQuery, ListResult};
use crate::types::statistics::AdminStatistics;

/// [`JobApi`] over HTTPS + JSON.
#[derive(Debug, Clone)]
pub struct HttpJobApi {
    client: HttpClient,
}

impl HttpJobApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Builds the underlying client with the bearer token attached to every request.
    pub fn connect(base_url: &Url, request_timeout: Duration, id_token: &str) -> Result<Self, JobApiError> {
        let client = HttpClient::builder(base_url.as_str())
            .and_then(|builder| builder.timeout(request_timeout).bearer_token(id_token))
            .and_then(|builder| builder.build())
            .map_err(|e| JobApiError::from_http_client_error("connect", e))?;
        Ok(Self::new(client))
    }

    fn list_route(role: ViewRole) -> &'static str {
        match role {
            ViewRole::JobSeeker => "job/seeker/list",
            ViewRole::JobOwner => "job/owner/list",
            ViewRole::Admin => "admin/job/list",
        }
    }

    /// Fails with a status-mapped error unless the response is a success, then decodes the body.
    async fn read_json<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, JobApiError> {
        let status = response.status();
        if !status.is_success() {
            let (message, status) = extract_http_error_text(response, operation).await;
            debug!(operation = operation, status = %status, "Job API returned an error status");
            return Err(JobApiError::from_status(operation, status, message));
        }

        let body = response.bytes().await.map_err(|e| JobApiError::from_reqwest_error(operation, e))?;
        serde_json::from_slice(&body).map_err(|e| JobApiError::parse_error(operation, e.to_string()))
    }

    async fn post_message(
        &self,
        operation: &str,
        route: &str,
        job_id: &str,
        body: Option<MessageBody>,
    ) -> Result<MessageResponse, JobApiError> {
        let mut request = self.client.request().method(Method::POST).path(route).path_param(job_id);
        if let Some(body) = body {
            request = request.json_body(&body).map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        }
        let response = request.send().await.map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }
}

#[async_trait]
impl JobApi for HttpJobApi {
    #[instrument(skip(self, query), fields(offset = query.offset, limit = query.limit, sort = %query.sort))]
    async fn list_jobs(&self, role: ViewRole, query: &ListQuery) -> Result<ListResult, JobApiError> {
        let operation = "list_jobs";
        let mut request = self.client.request().path(Self::list_route(role));
        for (key, value) in query.to_query_pairs() {
            request = request.query_param(key, value);
        }
        let response = request.send().await.map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        let result: ListResult = Self::read_json(operation, response).await?;

        if !result.is_consistent_with(query.offset) {
            warn!(
                offset = query.offset,
                returned = result.jobs.len(),
                total = result.total,
                has_more = result.has_more,
                "Listing reported an inconsistent hasMore flag"
            );
        }
        Ok(result)
    }

    #[instrument(skip(self, request), fields(name = %request.name, category_id = %request.category_id))]
    async fn create_job(&self, request: &CreateJobRequest) -> Result<Job, JobApiError> {
        let operation = "create_job";
        let response = self
            .client
            .request()
            .method(Method::POST)
            .path("job/owner/create")
            .json_body(request)
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?
            .send()
            .await
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }

    #[instrument(skip(self, request))]
    async fn update_job(&self, job_id: &str, request: &UpdateJobRequest) -> Result<Job, JobApiError> {
        let operation = "update_job";
        let response = self
            .client
            .request()
            .method(Method::PUT)
            .path("job/owner/update")
            .path_param(job_id)
            .json_body(request)
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?
            .send()
            .await
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }

    #[instrument(skip(self))]
    async fn claim_job(&self, job_id: &str) -> Result<MessageResponse, JobApiError> {
        self.post_message("claim_job", "job/seeker/claim", job_id, None).await
    }

    #[instrument(skip(self, message))]
    async fn submit_job(&self, job_id: &str, message: Option<String>) -> Result<MessageResponse, JobApiError> {
        let body = message.map(|message| MessageBody { message });
        self.post_message("submit_job", "job/seeker/submit", job_id, body).await
    }

    #[instrument(skip(self, message))]
    async fn approve_job(&self, job_id: &str, message: String) -> Result<MessageResponse, JobApiError> {
        self.post_message("approve_job", "job/owner/approve", job_id, Some(MessageBody { message })).await
    }

    #[instrument(skip(self, message))]
    async fn reject_job(&self, job_id: &str, message: String) -> Result<MessageResponse, JobApiError> {
        self.post_message("reject_job", "job/owner/reject", job_id, Some(MessageBody { message })).await
    }

    #[instrument(skip(self))]
    async fn delete_job(&self, role: ViewRole, job_id: &str) -> Result<MessageResponse, JobApiError> {
        let operation = "delete_job";
        let route = match role {
            ViewRole::JobOwner => "job/owner/delete",
            ViewRole::Admin => "admin/job/delete",
            ViewRole::JobSeeker => {
                return Err(JobApiError::UrlError {
                    operation: operation.to_string(),
                    message: "the seeker view has no delete route".to_string(),
                })
            }
        };
        let response = self
            .client
            .request()
            .method(Method::DELETE)
            .path(route)
            .path_param(job_id)
            .send()
            .await
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }

    #[instrument(skip(self))]
    async fn get_categories(&self) -> Result<CategoriesResponse, JobApiError> {
        let operation = "get_categories";
        let response = self
            .client
            .request()
            .path("categories")
            .send()
            .await
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }

    #[instrument(skip(self))]
    async fn get_admin_statistics(&self) -> Result<AdminStatistics, JobApiError> {
        let operation = "get_admin_statistics";
        let response = self
            .client
            .request()
            .path("admin/statistics")
            .send()
            .await
            .map_err(|e| JobApiError::from_http_client_error(operation, e))?;
        Self::read_json(operation, response).await
    }
}
