use crate::types::jobs::types::JobStatus;
use crate::types::list::{ListQuery, SortKey};

pub const DEFAULT_ITEMS_PER_PAGE: usize = 9;

/// Raw filter inputs of a board. Blank strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub category: String,
    pub status: Option<JobStatus>,
    pub sort: SortKey,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.category.trim().is_empty() && self.status.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based
    pub current_page: usize,
    pub items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self { current_page: 1, items_per_page: items_per_page.max(1) }
    }

    /// `(currentPage - 1) * itemsPerPage`. Page 0 counts as page 1.
    pub fn offset(&self) -> usize {
        self.current_page.saturating_sub(1).saturating_mul(self.items_per_page)
    }
}

/// Builds the query for the current filter and page. Pure and total.
pub fn build_query(filter: &FilterState, page: &PageState) -> ListQuery {
    ListQuery {
        offset: page.offset(),
        limit: page.items_per_page.max(1),
        search: non_blank(&filter.search),
        category: non_blank(&filter.category),
        status: filter.status,
        sort: filter.sort,
    }
}

/// `ceil(total / itemsPerPage)`; zero when there is nothing to show.
pub fn total_pages(total: usize, items_per_page: usize) -> usize {
    total.div_ceil(items_per_page.max(1))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(25, 9, 3)]
    #[case(27, 9, 3)]
    #[case(28, 9, 4)]
    #[case(0, 9, 0)]
    #[case(1, 9, 1)]
    #[case(5, 0, 5)]
    fn total_pages_rounds_up(#[case] total: usize, #[case] per_page: usize, #[case] expected: usize) {
        assert_eq!(total_pages(total, per_page), expected);
    }

    #[test]
    fn blank_filters_are_omitted() {
        let filter = FilterState { search: "   ".into(), category: String::new(), status: None, sort: SortKey::Newest };
        let query = build_query(&filter, &PageState::default());

        assert_eq!(query.search, None);
        assert_eq!(query.category, None);
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("search").is_none());
        assert!(json.get("category").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn filters_are_trimmed() {
        let filter = FilterState {
            search: "  garden ".into(),
            category: " c1".into(),
            status: Some(JobStatus::Open),
            sort: SortKey::Closing,
        };
        let query = build_query(&filter, &PageState { current_page: 3, items_per_page: 9 });

        assert_eq!(query.offset, 18);
        assert_eq!(query.limit, 9);
        assert_eq!(query.search.as_deref(), Some("garden"));
        assert_eq!(query.category.as_deref(), Some("c1"));
        assert_eq!(query.sort, SortKey::Closing);
    }

    #[test]
    fn page_zero_and_huge_pages_do_not_overflow() {
        assert_eq!(PageState { current_page: 0, items_per_page: 9 }.offset(), 0);
        assert_eq!(PageState { current_page: usize::MAX, items_per_page: 9 }.offset(), usize::MAX);
    }
}
