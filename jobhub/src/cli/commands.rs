use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::render;
use super::{Cli, Commands, DraftArgs, DraftUpdateArgs, ListArgs};
use crate::board::{ActionRequest, JobBoard, RefreshOutcome};
use crate::config::JobHubParams;
use crate::core::client::auth::jwt::JwtAuthProvider;
use crate::core::client::auth::AuthProvider;
use crate::core::client::job_api::http::HttpJobApi;
use crate::core::client::job_api::JobApi;
use crate::error::{JobHubError, JobHubResult, ValidationError};
use crate::forms::JobDraft;
use crate::metrics::JobMetrics;
use crate::types::jobs::job_item::Job;

/// Resolves configuration and identity, opens a board for the requested view, runs one command
/// and tears the board down again.
pub async fn run(cli: Cli) -> JobHubResult<()> {
    let params = JobHubParams::resolve(&cli.api, &cli.board, cli.config_file.as_deref())?;
    let provider = JwtAuthProvider::new(params.id_token.clone());
    let token = provider.id_token().await?;

    let api: Arc<dyn JobApi> = Arc::new(HttpJobApi::connect(&params.api_base_url, params.request_timeout, &token)?);
    let board = JobBoard::open(api, &provider, cli.board.role, params.board).await?;
    info!(role = %board.role(), actor_id = %board.session().actor().id, "Board opened");

    let mut out = Vec::new();
    let result = dispatch(&board, cli.command, &mut out).await;
    board.teardown().await;

    std::io::stdout().write_all(&out)?;
    result
}

#[instrument(skip_all)]
pub async fn dispatch(board: &JobBoard, command: Commands, out: &mut impl Write) -> JobHubResult<()> {
    match command {
        Commands::Whoami => {
            render::render_actor(out, board.session().actor())?;
        }
        Commands::List { filter } => {
            apply_list_args(board, &filter).await?;
            board.load_categories().await?;
            let snapshot = board.snapshot().await;
            render::render_board(out, &snapshot, |job| board.actions_for(job))?;
        }
        Commands::Show { job_id } => {
            let job = locate(board, &job_id).await?;
            render::render_job(out, &job, &board.actions_for(&job))?;
        }
        Commands::Claim { job_id } => perform(board, &job_id, ActionRequest::Claim, out).await?,
        Commands::Submit { job_id, message } => perform(board, &job_id, ActionRequest::Submit { message }, out).await?,
        Commands::Approve { job_id, message } => {
            perform(board, &job_id, ActionRequest::Approve { message }, out).await?
        }
        Commands::Reject { job_id, message } => perform(board, &job_id, ActionRequest::Reject { message }, out).await?,
        Commands::Delete { job_id } => perform(board, &job_id, ActionRequest::Delete, out).await?,
        Commands::Create { draft, category } => {
            let job = board.create_job(draft_from_args(draft, category)).await?;
            writeln!(out, "Job posted: {}", job.job_id)?;
        }
        Commands::Update { job_id, draft } => {
            let job = locate(board, &job_id).await?;
            let updated = board.update_job(&job_id, merge_draft(&job, draft)).await?;
            writeln!(out, "Job updated: {}", updated.job_id)?;
        }
        Commands::Categories => {
            let categories = board.load_categories().await?;
            render::render_categories(out, &categories)?;
        }
        Commands::Stats { days } => {
            let statistics = board.load_statistics().await?;
            render::render_statistics(out, &statistics, days)?;
        }
        Commands::Metrics => {
            let jobs = collect_all_jobs(board).await?;
            render::render_metrics(out, &JobMetrics::from_jobs(&jobs, Utc::now()))?;
        }
    }
    Ok(())
}

/// Loads the page described by `args`. Filters are applied in one step, then the page is moved,
/// since any filter change lands on page 1.
async fn apply_list_args(board: &JobBoard, args: &ListArgs) -> JobHubResult<()> {
    let mut filter = board.snapshot().await.filter;
    if let Some(search) = &args.search {
        filter.search = search.clone();
    }
    if let Some(category) = &args.category {
        filter.category = category.clone();
    } else if args.any_category {
        filter.category.clear();
    }
    if args.status.is_some() {
        filter.status = args.status;
    }
    if let Some(sort) = args.sort {
        filter.sort = sort;
    }

    let outcome = match board.set_filters(filter).await? {
        RefreshOutcome::Unchanged => board.refresh().await?,
        outcome => outcome,
    };
    if outcome == RefreshOutcome::Discarded {
        return Err(JobHubError::BoardClosed);
    }
    if args.page > 1 && board.change_page(args.page).await? == RefreshOutcome::Unchanged {
        debug!(page = args.page, "Requested page is out of range");
    }
    Ok(())
}

async fn locate(board: &JobBoard, job_id: &str) -> JobHubResult<Job> {
    board.locate(job_id).await?.ok_or_else(|| ValidationError::UnknownJob { job_id: job_id.to_string() }.into())
}

async fn perform(board: &JobBoard, job_id: &str, request: ActionRequest, out: &mut impl Write) -> JobHubResult<()> {
    locate(board, job_id).await?;
    let outcome = board.perform(job_id, request).await?;
    writeln!(out, "{} {}: {}", outcome.action, outcome.job_id, outcome.message)?;
    Ok(())
}

/// Walks every page of the current view.
async fn collect_all_jobs(board: &JobBoard) -> JobHubResult<Vec<Job>> {
    if board.clear_filters().await? == RefreshOutcome::Unchanged {
        board.refresh().await?;
    }

    let mut jobs = Vec::new();
    let mut page = 1;
    loop {
        let snapshot = board.snapshot().await;
        jobs.extend(snapshot.jobs);
        if page >= snapshot.total_pages {
            break;
        }
        page += 1;
        if board.change_page(page).await? != RefreshOutcome::Applied {
            break;
        }
    }
    Ok(jobs)
}

fn draft_from_args(args: DraftArgs, category: String) -> JobDraft {
    JobDraft {
        name: args.name,
        description: args.description,
        category_id: Some(category),
        pay_amount: args.pay,
        complete_by: args.complete_by,
        expires_at: args.expires_at,
    }
}

fn merge_draft(job: &Job, args: DraftUpdateArgs) -> JobDraft {
    let mut draft = JobDraft::from_job(job, Utc::now());
    if let Some(name) = args.name {
        draft.name = name;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(pay) = args.pay {
        draft.pay_amount = pay;
    }
    if let Some(complete_by) = args.complete_by {
        draft.complete_by = complete_by;
    }
    if let Some(expires_at) = args.expires_at {
        draft.expires_at = expires_at;
    }
    draft
}
