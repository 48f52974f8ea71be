//! Plain-text rendering of boards and payloads.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::board::BoardSnapshot;
use crate::forms::user_acronym;
use crate::metrics::statistics::{claim_percentage, format_stat_date, recent_stats};
use crate::metrics::JobMetrics;
use crate::types::actor::Actor;
use crate::types::category::{category_name, Category};
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::JobAction;
use crate::types::statistics::AdminStatistics;

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn format_actions(actions: &[JobAction]) -> String {
    if actions.is_empty() {
        "-".to_string()
    } else {
        actions.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}

pub fn render_actor(out: &mut impl Write, actor: &Actor) -> io::Result<()> {
    let name = actor.display_name();
    writeln!(out, "[{}] {}", user_acronym(&name), name)?;
    writeln!(out, "  id:     {}", actor.id)?;
    writeln!(out, "  email:  {}", actor.email)?;
    if let Some(phone) = &actor.attributes.phone_number {
        writeln!(out, "  phone:  {}", phone)?;
    }
    if let Some(preferences) = &actor.attributes.job_preferences {
        writeln!(out, "  prefs:  {}", preferences.join(", "))?;
    }
    writeln!(out, "  admin:  {}", actor.is_admin())
}

/// One line per job with the actions offered to the viewer, then the page footer.
pub fn render_board(
    out: &mut impl Write,
    board: &BoardSnapshot,
    actions_for: impl Fn(&Job) -> Vec<JobAction>,
) -> io::Result<()> {
    if board.is_empty {
        return writeln!(out, "No jobs match the current filters.");
    }

    for job in &board.jobs {
        let category = category_name(&board.categories, &job.category_id).unwrap_or(&job.category_id);
        writeln!(
            out,
            "{:<38} {:<10} {:>9.2}  closes {}  {} [{}]  actions: {}",
            job.job_id,
            job.status,
            job.pay_amount,
            format_timestamp(job.expiry_date),
            job.name,
            category,
            format_actions(&actions_for(job)),
        )?;
    }
    writeln!(
        out,
        "page {}/{} - {} job(s){}",
        board.page.current_page,
        board.total_pages,
        board.total,
        if board.has_more { ", more available" } else { "" }
    )
}

pub fn render_job(out: &mut impl Write, job: &Job, actions: &[JobAction]) -> io::Result<()> {
    writeln!(out, "{} ({})", job.name, job.job_id)?;
    writeln!(out, "  status:      {}", job.status)?;
    writeln!(out, "  owner:       {}", job.owner_id)?;
    writeln!(out, "  claimer:     {}", job.claimer_id.as_deref().unwrap_or("-"))?;
    writeln!(out, "  category:    {}", job.category_id)?;
    writeln!(out, "  pay:         {:.2}", job.pay_amount)?;
    writeln!(out, "  created:     {}", format_timestamp(job.created_at))?;
    writeln!(out, "  complete by: {}", format_timestamp(job.completion_date()))?;
    writeln!(out, "  expires:     {}", format_timestamp(job.expiry_date))?;
    for (label, message) in [
        ("submission", &job.submission_message),
        ("approval", &job.approval_message),
        ("rejection", &job.rejection_message),
    ] {
        if let Some(message) = message {
            writeln!(out, "  {:<12} {}", format!("{}:", label), message)?;
        }
    }
    if !job.description.is_empty() {
        writeln!(out, "\n{}\n", job.description)?;
    }
    writeln!(out, "  actions:     {}", format_actions(actions))
}

pub fn render_categories(out: &mut impl Write, categories: &[Category]) -> io::Result<()> {
    for category in categories {
        writeln!(out, "{:<24} {:<20} {}", category.category_id, category.name, category.description)?;
    }
    writeln!(out, "{} categor{}", categories.len(), if categories.len() == 1 { "y" } else { "ies" })
}

pub fn render_statistics(out: &mut impl Write, statistics: &AdminStatistics, days: usize) -> io::Result<()> {
    writeln!(out, "Total jobs:     {}", statistics.total_jobs)?;
    writeln!(out, "Posted:         {}", statistics.total_posted_jobs)?;
    writeln!(out, "Claimed:        {}", statistics.total_claimed_jobs)?;
    writeln!(out, "Submitted:      {}", statistics.total_submitted_jobs)?;
    writeln!(out, "Approved:       {}", statistics.total_approved_jobs)?;
    writeln!(out, "Rejected:       {}", statistics.total_rejected_jobs)?;
    writeln!(out, "Expired:        {}", statistics.total_expired_jobs)?;
    if !statistics.summary.stats_period.is_empty() {
        writeln!(out, "Period:         {}", statistics.summary.stats_period)?;
    }

    writeln!(out, "\nDaily claims")?;
    for stat in recent_stats(statistics, days) {
        let pct = claim_percentage(statistics, stat.claimed);
        let bar = "#".repeat((pct / 5.0).round() as usize);
        writeln!(out, "  {:<7} {:>4} {}", format_stat_date(&stat.date), stat.claimed, bar)?;
    }

    if !statistics.recent.is_empty() {
        writeln!(out, "\nRecent activity")?;
        for activity in &statistics.recent {
            writeln!(out, "  {:<10} {}  {}", activity.activity_type.to_lowercase(), activity.date_time, activity.description)?;
        }
    }
    Ok(())
}

pub fn render_metrics(out: &mut impl Write, metrics: &JobMetrics) -> io::Result<()> {
    writeln!(out, "Jobs:      {}", metrics.total_jobs)?;
    writeln!(out, "Applied:   {} ({}%)", metrics.applied_count, metrics.applied_pct)?;
    writeln!(out, "Completed: {} ({}%)", metrics.completed_count, metrics.completed_pct)?;
    writeln!(out, "Paid:      {} ({}%)", metrics.paid_count, metrics.paid_pct)?;
    writeln!(out, "Expired:   {}", metrics.expired_count)?;

    writeln!(out, "\nClaims per day")?;
    for point in &metrics.trend {
        writeln!(out, "  {}  {}", point.date, point.applied)?;
    }

    if !metrics.recent_actions.is_empty() {
        writeln!(out, "\nRecent")?;
        for action in &metrics.recent_actions {
            writeln!(out, "  {:<10} {}  {}", action.status, format_timestamp(action.at), action.title)?;
        }
    }
    Ok(())
}
