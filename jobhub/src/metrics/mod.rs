//! Dashboard metrics derived from a job listing, plus helpers for the admin statistics payload.

pub mod statistics;

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::JobStatus;

/// Days covered by the claim trend, today included.
pub const TREND_DAYS: i64 = 8;
pub const RECENT_ACTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetrics {
    pub total_jobs: usize,
    /// Jobs that left `open` (claimed at some point)
    pub applied_count: usize,
    /// Jobs whose work was submitted, reviewed or not
    pub completed_count: usize,
    /// Approved jobs
    pub paid_count: usize,
    /// Open jobs past their expiry date
    pub expired_count: usize,
    pub applied_pct: u32,
    pub completed_pct: u32,
    pub paid_pct: u32,
    pub by_status: BTreeMap<String, usize>,
    pub trend: Vec<TrendPoint>,
    pub recent_actions: Vec<RecentAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub applied: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentAction {
    pub job_id: String,
    pub title: String,
    pub status: JobStatus,
    pub at: DateTime<Utc>,
}

/// `round(part / whole * 100)`, zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

impl JobMetrics {
    pub fn from_jobs(jobs: &[Job], now: DateTime<Utc>) -> Self {
        let total_jobs = jobs.len();
        let applied_count = jobs.iter().filter(|job| job.status != JobStatus::Open).count();
        let completed_count = jobs
            .iter()
            .filter(|job| matches!(job.status, JobStatus::Submitted | JobStatus::Approved | JobStatus::Rejected))
            .count();
        let paid_count = jobs.iter().filter(|job| job.status == JobStatus::Approved).count();
        let expired_count = jobs.iter().filter(|job| job.status == JobStatus::Open && job.is_expired(now)).count();

        let mut by_status = BTreeMap::new();
        for job in jobs {
            *by_status.entry(job.status.to_string()).or_insert(0) += 1;
        }

        Self {
            total_jobs,
            applied_count,
            completed_count,
            paid_count,
            expired_count,
            applied_pct: percentage(applied_count, total_jobs),
            completed_pct: percentage(completed_count, applied_count),
            paid_pct: percentage(paid_count, completed_count),
            by_status,
            trend: claim_trend(jobs, now),
            recent_actions: recent_actions(jobs, RECENT_ACTIONS),
        }
    }
}

/// Claims per day over the last [`TREND_DAYS`] days, oldest first.
fn claim_trend(jobs: &[Job], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let today = now.date_naive();
    (0..TREND_DAYS)
        .rev()
        .map(|days_ago| {
            let date = today - Duration::days(days_ago);
            let applied = jobs.iter().filter_map(|job| job.claimed_at).filter(|at| at.date_naive() == date).count();
            TrendPoint { date, applied }
        })
        .collect()
}

/// Most recently touched jobs first.
fn recent_actions(jobs: &[Job], limit: usize) -> Vec<RecentAction> {
    let mut actions: Vec<RecentAction> = jobs
        .iter()
        .map(|job| {
            let at = [job.updated_at, job.submitted_at, job.claimed_at].into_iter().flatten().max().unwrap_or(job.created_at);
            RecentAction { job_id: job.job_id.clone(), title: job.name.clone(), status: job.status, at }
        })
        .collect();
    actions.sort_by(|a, b| b.at.cmp(&a.at));
    actions.truncate(limit);
    actions
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn job(id: &str, status: JobStatus, now: DateTime<Utc>) -> Job {
        Job {
            job_id: id.to_string(),
            owner_id: "owner-1".to_string(),
            claimer_id: status.requires_claimer().then(|| "seeker-1".to_string()),
            category_id: "c1".to_string(),
            name: format!("Job {}", id),
            description: String::new(),
            pay_amount: 10.0,
            time_to_complete_seconds: 60,
            expiry_date: now + Duration::days(1),
            status,
            created_at: now - Duration::days(3),
            updated_at: None,
            claimed_at: status.requires_claimer().then(|| now - Duration::days(1)),
            submitted_at: None,
            submission_message: None,
            approval_message: None,
            rejection_message: None,
        }
    }

    #[test]
    fn counts_and_percentages_follow_the_funnel() {
        let now = Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap();
        let mut expired = job("j0", JobStatus::Open, now);
        expired.expiry_date = now - Duration::hours(1);
        let jobs = vec![
            expired,
            job("j1", JobStatus::Open, now),
            job("j2", JobStatus::Claimed, now),
            job("j3", JobStatus::Submitted, now),
            job("j4", JobStatus::Approved, now),
            job("j5", JobStatus::Rejected, now),
        ];

        let metrics = JobMetrics::from_jobs(&jobs, now);
        assert_eq!(metrics.total_jobs, 6);
        assert_eq!(metrics.expired_count, 1);
        assert_eq!(metrics.applied_count, 4);
        assert_eq!(metrics.applied_pct, 67);
        assert_eq!(metrics.completed_count, 3);
        assert_eq!(metrics.completed_pct, 75);
        assert_eq!(metrics.paid_count, 1);
        assert_eq!(metrics.paid_pct, 33);
        assert_eq!(metrics.by_status.get("open"), Some(&2));
    }

    #[test]
    fn trend_covers_the_last_days_oldest_first() {
        let now = Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap();
        let metrics = JobMetrics::from_jobs(&[job("j2", JobStatus::Claimed, now)], now);

        assert_eq!(metrics.trend.len(), TREND_DAYS as usize);
        assert_eq!(metrics.trend.last().map(|p| p.date), Some(now.date_naive()));
        assert_eq!(metrics.trend[TREND_DAYS as usize - 2].applied, 1);
        assert_eq!(metrics.recent_actions[0].job_id, "j2");
    }

    #[test]
    fn empty_listing_has_zero_percentages() {
        let metrics = JobMetrics::from_jobs(&[], Utc::now());
        assert_eq!((metrics.applied_pct, metrics.completed_pct, metrics.paid_pct), (0, 0, 0));
        assert!(metrics.recent_actions.is_empty());
    }
}
