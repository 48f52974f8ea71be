use clap::Args;

use crate::types::jobs::types::ViewRole;

/// Parameters of the job board view.
#[derive(Debug, Clone, Args)]
pub struct BoardCliArgs {
    /// View to act in.
    #[arg(env = "JOBHUB_ROLE", long, global = true, value_enum, default_value_t = ViewRole::JobSeeker)]
    pub role: ViewRole,

    /// Jobs per page.
    #[arg(env = "JOBHUB_ITEMS_PER_PAGE", long, global = true)]
    pub items_per_page: Option<usize>,

    /// Quiet period before a search term is sent, in milliseconds.
    #[arg(env = "JOBHUB_SEARCH_DEBOUNCE_MS", long, global = true)]
    pub search_debounce_ms: Option<u64>,
}
