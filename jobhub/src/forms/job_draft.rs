use chrono::{DateTime, Duration, Utc};

use crate::error::validation::ValidationError;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::requests::{CreateJobRequest, UpdateJobRequest};

pub const MIN_PAY_AMOUNT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    /// The category of an existing job is fixed and never sent.
    Update,
}

/// A job as entered by its owner. Deadlines are absolute and turned into seconds-from-now when
/// the request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct JobDraft {
    pub name: String,
    pub description: String,
    pub category_id: Option<String>,
    pub pay_amount: f64,
    pub complete_by: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Whole seconds from `now` to `target`, clamped at zero.
pub fn seconds_until(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((target - now).num_seconds()).unwrap_or(0)
}

impl JobDraft {
    /// Prefills an edit of `job`: the completion deadline is `now + timeToCompleteSeconds`.
    pub fn from_job(job: &Job, now: DateTime<Utc>) -> Self {
        Self {
            name: job.name.clone(),
            description: job.description.clone(),
            category_id: Some(job.category_id.clone()),
            pay_amount: job.pay_amount,
            complete_by: job.completion_after(now),
            expires_at: job.expiry_date,
        }
    }

    pub fn validate(&self, mode: DraftMode, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::invalid_field("name", "is required"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::invalid_field("description", "is required"));
        }
        if mode == DraftMode::Create && self.category_id.as_deref().map_or(true, |c| c.trim().is_empty()) {
            return Err(ValidationError::invalid_field("categoryId", "is required"));
        }
        if !self.pay_amount.is_finite() || self.pay_amount < MIN_PAY_AMOUNT {
            return Err(ValidationError::invalid_field("payAmount", format!("must be at least {}", MIN_PAY_AMOUNT)));
        }
        if self.complete_by <= now {
            return Err(ValidationError::invalid_field("timeToComplete", "must be in the future"));
        }
        if self.expires_at <= now {
            return Err(ValidationError::invalid_field("expiryDate", "must be in the future"));
        }
        Ok(())
    }

    pub fn into_create_request(self, now: DateTime<Utc>) -> Result<CreateJobRequest, ValidationError> {
        self.validate(DraftMode::Create, now)?;
        Ok(CreateJobRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category_id: self.category_id.unwrap_or_default().trim().to_string(),
            pay_amount: self.pay_amount,
            time_to_complete_seconds: seconds_until(self.complete_by, now),
            expiry_seconds: seconds_until(self.expires_at, now),
        })
    }

    pub fn into_update_request(self, now: DateTime<Utc>) -> Result<UpdateJobRequest, ValidationError> {
        self.validate(DraftMode::Update, now)?;
        Ok(UpdateJobRequest {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            pay_amount: self.pay_amount,
            time_to_complete_seconds: seconds_until(self.complete_by, now),
            expiry_seconds: seconds_until(self.expires_at, now),
        })
    }
}
