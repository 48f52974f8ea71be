use std::cmp::Ordering;

use crate::types::jobs::job_item::Job;
use crate::types::list::{ListQuery, ListResult, SortKey};

/// Evaluates a query against jobs already in memory, with the same semantics as the listing endpoint.
pub fn apply_locally(jobs: &[Job], query: &ListQuery) -> ListResult {
    let needle = query.search.as_deref().map(str::to_lowercase);

    let mut matching: Vec<&Job> = jobs
        .iter()
        .filter(|job| match &needle {
            Some(needle) => {
                job.name.to_lowercase().contains(needle) || job.description.to_lowercase().contains(needle)
            }
            None => true,
        })
        .filter(|job| query.category.as_deref().map_or(true, |category| job.category_id == category))
        .filter(|job| query.status.map_or(true, |status| job.status == status))
        .collect();

    matching.sort_by(|a, b| compare(a, b, query.sort));

    let total = matching.len();
    let page: Vec<Job> = matching.into_iter().skip(query.offset).take(query.limit).cloned().collect();
    let has_more = query.offset.saturating_add(page.len()) < total;

    ListResult { jobs: page, total, has_more, owner_id: None, seeker_id: None }
}

fn compare(a: &Job, b: &Job, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Newest => b.created_at.cmp(&a.created_at),
        SortKey::Highest => b.pay_amount.partial_cmp(&a.pay_amount).unwrap_or(Ordering::Equal),
        SortKey::Closing => a.expiry_date.cmp(&b.expiry_date),
    }
}
