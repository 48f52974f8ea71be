use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::types::JobStatus;

/// A job as returned by the Job API. The client never mutates it locally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: String,
    pub owner_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none", skip_serializing_if = "Option::is_none")]
    pub claimer_id: Option<String>,
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub pay_amount: f64,
    pub time_to_complete_seconds: u64,
    pub expiry_date: DateTime<Utc>,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "empty_string_as_none", skip_serializing_if = "Option::is_none")]
    pub submission_message: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none", skip_serializing_if = "Option::is_none")]
    pub approval_message: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none", skip_serializing_if = "Option::is_none")]
    pub rejection_message: Option<String>,
}

impl Job {
    /// `createdAt + timeToCompleteSeconds`
    pub fn completion_date(&self) -> DateTime<Utc> {
        self.completion_after(self.created_at)
    }

    /// `start + timeToCompleteSeconds`, saturating at the latest representable instant.
    pub fn completion_after(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        i64::try_from(self.time_to_complete_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|offset| start.checked_add_signed(offset))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date <= now
    }

    /// `claimerId` is set iff the job has left `open`.
    pub fn claimer_invariant_holds(&self) -> bool {
        self.status.requires_claimer() == self.claimer_id.is_some()
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
