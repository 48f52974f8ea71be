pub mod error;
pub mod http;

use async_trait::async_trait;
pub use error::JobApiError;

use crate::types::category::CategoriesResponse;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::requests::{CreateJobRequest, MessageResponse, UpdateJobRequest};
use crate::types::jobs::types::ViewRole;
use crate::types::list::{ListQuery, ListResult};
use crate::types::statistics::AdminStatistics;

/// The remote Job API. Owns every state transition; the client only requests them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobApi: Send + Sync {
    /// list_jobs - One page of the listing visible in `role`'s view
    async fn list_jobs(&self, role: ViewRole, query: &ListQuery) -> Result<ListResult, JobApiError>;

    /// create_job - Post a new job; the server assigns id, `createdAt` and `status=open`
    async fn create_job(&self, request: &CreateJobRequest) -> Result<Job, JobApiError>;
    /// update_job - Replace the editable fields of an open job
    async fn update_job(&self, job_id: &str, request: &UpdateJobRequest) -> Result<Job, JobApiError>;

    /// claim_job - First writer wins; losers get a conflict
    async fn claim_job(&self, job_id: &str) -> Result<MessageResponse, JobApiError>;
    async fn submit_job(&self, job_id: &str, message: Option<String>) -> Result<MessageResponse, JobApiError>;
    async fn approve_job(&self, job_id: &str, message: String) -> Result<MessageResponse, JobApiError>;
    async fn reject_job(&self, job_id: &str, message: String) -> Result<MessageResponse, JobApiError>;
    /// delete_job - Owner delete, or admin delete without the ownership check
    async fn delete_job(&self, role: ViewRole, job_id: &str) -> Result<MessageResponse, JobApiError>;

    async fn get_categories(&self) -> Result<CategoriesResponse, JobApiError>;
    async fn get_admin_statistics(&self) -> Result<AdminStatistics, JobApiError>;
}
