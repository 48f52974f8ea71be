use crate::query::{build_query, total_pages, FilterState, PageState, QuerySequencer, QueryTicket};
use crate::types::category::Category;
use crate::types::jobs::job_item::Job;
use crate::types::jobs::types::JobStatus;
use crate::types::list::{ListQuery, ListResult, SortKey};
use crate::types::statistics::AdminStatistics;

/// Filter, page and result state of one board.
///
/// Any filter change moves back to page 1; a page change alone keeps the filters.
#[derive(Debug)]
pub struct BoardState {
    filter: FilterState,
    page: PageState,
    jobs: Vec<Job>,
    total: usize,
    has_more: bool,
    loaded: bool,
    sequencer: QuerySequencer,
    categories: Vec<Category>,
    statistics: Option<AdminStatistics>,
}

impl BoardState {
    pub fn new(items_per_page: usize, filter: FilterState) -> Self {
        Self {
            filter,
            page: PageState::new(items_per_page),
            jobs: Vec::new(),
            total: 0,
            has_more: false,
            loaded: false,
            sequencer: QuerySequencer::default(),
            categories: Vec::new(),
            statistics: None,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page.items_per_page)
    }

    /// A listing came back and matched nothing.
    pub fn is_empty_state(&self) -> bool {
        self.loaded && self.total == 0
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn statistics(&self) -> Option<&AdminStatistics> {
        self.statistics.as_ref()
    }

    pub fn set_statistics(&mut self, statistics: AdminStatistics) {
        self.statistics = Some(statistics);
    }

    pub fn find_job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.job_id == job_id)
    }

    /// Returns whether the effective search term changed.
    pub fn set_search(&mut self, search: &str) -> bool {
        if self.filter.search.trim() == search.trim() {
            return false;
        }
        self.filter.search = search.to_string();
        self.reset_page();
        true
    }

    pub fn set_category(&mut self, category: &str) -> bool {
        if self.filter.category.trim() == category.trim() {
            return false;
        }
        self.filter.category = category.to_string();
        self.reset_page();
        true
    }

    pub fn set_status(&mut self, status: Option<JobStatus>) -> bool {
        if self.filter.status == status {
            return false;
        }
        self.filter.status = status;
        self.reset_page();
        true
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if self.filter.sort == sort {
            return false;
        }
        self.filter.sort = sort;
        self.reset_page();
        true
    }

    /// Replaces every filter at once. Resets the page only when something effectively changed.
    pub fn replace_filter(&mut self, filter: FilterState) -> bool {
        let unchanged = self.filter.search.trim() == filter.search.trim()
            && self.filter.category.trim() == filter.category.trim()
            && self.filter.status == filter.status
            && self.filter.sort == filter.sort;
        if unchanged {
            return false;
        }
        self.filter = filter;
        self.reset_page();
        true
    }

    /// Drops search, category and status. The sort order is kept.
    pub fn clear_filters(&mut self) -> bool {
        if self.filter.is_empty() {
            return false;
        }
        self.filter = FilterState { sort: self.filter.sort, ..FilterState::default() };
        self.reset_page();
        true
    }

    /// Moves to `page` when it lies in `1..=total_pages`; anything else is ignored.
    pub fn change_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.total_pages() || page == self.page.current_page {
            return false;
        }
        self.page.current_page = page;
        true
    }

    fn reset_page(&mut self) {
        self.page.current_page = 1;
    }

    /// Issues a ticket for the query matching the current state.
    pub fn begin_query(&mut self) -> (QueryTicket, ListQuery) {
        (self.sequencer.issue(), build_query(&self.filter, &self.page))
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.sequencer.is_current(ticket)
    }

    /// Stores `result` if `ticket` is still the latest one. Stale results are dropped.
    pub fn apply_result(&mut self, ticket: QueryTicket, result: ListResult) -> bool {
        if !self.sequencer.is_current(ticket) {
            return false;
        }
        self.jobs = result.jobs;
        self.total = result.total;
        self.has_more = result.has_more;
        self.loaded = true;
        true
    }

    pub fn close(&mut self) {
        self.sequencer.close();
    }

    pub fn is_closed(&self) -> bool {
        self.sequencer.is_closed()
    }
}
