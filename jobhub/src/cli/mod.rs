pub mod api;
pub mod board;
pub mod commands;
pub mod render;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::types::jobs::types::JobStatus;
use crate::types::list::SortKey;
pub use commands::run;

#[derive(Parser, Debug)]
#[command(
    name = "jobhub",
    version,
    about = "JobHub client - browse, post and work on marketplace jobs",
    after_help = "Examples:\n  \
    jobhub --role seeker list --sort closing\n  \
    jobhub --role seeker claim <JOB_ID>\n  \
    jobhub --role owner approve <JOB_ID> --message \"Thanks!\"\n  \
    jobhub --role admin stats"
)]
pub struct Cli {
    #[command(flatten)]
    pub api: api::ApiCliArgs,

    #[command(flatten)]
    pub board: board::BoardCliArgs,

    /// Path to a YAML configuration file (`config_version: "1"`).
    #[arg(env = "JOBHUB_CONFIG_FILE", long, value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the signed-in actor
    Whoami,
    /// List one page of jobs
    List {
        #[command(flatten)]
        filter: ListArgs,
    },
    /// Show one job and the actions available on it
    Show { job_id: String },
    /// Claim an open job (seeker view)
    Claim { job_id: String },
    /// Submit the work of a claimed job (seeker view)
    Submit {
        job_id: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Approve a submission (owner view)
    Approve {
        job_id: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Reject a submission (owner view)
    Reject {
        job_id: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Delete an open job (owner or admin view)
    Delete { job_id: String },
    /// Post a new job (owner view)
    Create {
        #[command(flatten)]
        draft: DraftArgs,
        #[arg(long)]
        category: String,
    },
    /// Edit an open job (owner view); omitted fields keep their current value
    Update {
        job_id: String,
        #[command(flatten)]
        draft: DraftUpdateArgs,
    },
    /// List job categories
    Categories,
    /// Show platform statistics (admin view)
    Stats {
        /// Number of most recent days to show
        #[arg(long, default_value_t = crate::metrics::statistics::RECENT_STAT_DAYS)]
        days: usize,
    },
    /// Dashboard metrics over every job visible in the current view
    Metrics,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive match on name and description
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Ignore the preferred category of the seeker view
    #[arg(long, conflicts_with = "category")]
    pub any_category: bool,
    #[arg(long)]
    pub status: Option<JobStatus>,
    #[arg(long, value_enum)]
    pub sort: Option<SortKey>,
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub pay: f64,
    /// Completion deadline (RFC 3339)
    #[arg(long)]
    pub complete_by: DateTime<Utc>,
    /// Claims are refused from this instant on (RFC 3339)
    #[arg(long)]
    pub expires_at: DateTime<Utc>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DraftUpdateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub pay: Option<f64>,
    #[arg(long)]
    pub complete_by: Option<DateTime<Utc>>,
    #[arg(long)]
    pub expires_at: Option<DateTime<Utc>>,
}
