use serde::{Deserialize, Serialize};

/// Response of `GET /admin/statistics`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStatistics {
    pub summary: StatisticsSummary,
    pub total_posted_jobs: u64,
    pub total_expired_jobs: u64,
    pub query_parameters: Option<StatisticsQueryParameters>,
    pub stats: Vec<DailyStat>,
    pub total_approved_jobs: u64,
    pub total_jobs: u64,
    pub total_claimed_jobs: u64,
    pub total_submitted_jobs: u64,
    pub total_rejected_jobs: u64,
    pub recent: Vec<RecentActivity>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsSummary {
    pub total_activities_found: u64,
    pub recent_period: String,
    pub stats_period: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsQueryParameters {
    pub recent_days: u32,
    pub recent_limit: u32,
    pub stats_days: u32,
    pub generated_at: String,
}

/// Claims per day. `date` is formatted `yy-mm-dd`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyStat {
    pub date: String,
    pub claimed: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub description: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub date_time: String,
}
