use serde::{Deserialize, Serialize};

use super::jobs::job_item::Job;
use super::jobs::types::JobStatus;

/// Sort order of a job listing. `newest` is the only default.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortKey {
    /// `createdAt` descending
    #[default]
    #[serde(alias = "createdAt")]
    #[strum(to_string = "newest", serialize = "createdAt")]
    Newest,
    /// `payAmount` descending
    Highest,
    /// `expiryDate` ascending
    Closing,
}

/// Normalized listing query. Optional filters that are `None` are not sent at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub offset: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(rename = "sortBy")]
    pub sort: SortKey,
}

impl ListQuery {
    /// Query-string pairs in wire order: `offset`, `limit`, `sortBy`, then the present filters.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs =
            vec![("offset", self.offset.to_string()), ("limit", self.limit.to_string()), ("sortBy", self.sort.to_string())];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }
        pairs
    }
}

/// One page of a listing as returned by the Job API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeker_id: Option<String>,
}

impl ListResult {
    /// `hasMore` must equal `offset + jobs.len() < total`.
    pub fn is_consistent_with(&self, offset: usize) -> bool {
        self.has_more == (offset.saturating_add(self.jobs.len()) < self.total)
    }

    /// The identity the server resolved for this listing, if it reported one.
    pub fn viewer_id(&self) -> Option<&str> {
        self.seeker_id.as_deref().or(self.owner_id.as_deref()).filter(|id| !id.is_empty())
    }
}
