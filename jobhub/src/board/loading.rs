use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Independent parts of a board that show their own loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum LoadingRegion {
    JobList,
    Categories,
    Statistics,
    Action,
}

/// Loading state per region. Counted rather than flagged so overlapping requests in one region
/// keep it loading until the last one finishes.
#[derive(Debug, Default)]
pub struct LoadingRegions {
    job_list: AtomicUsize,
    categories: AtomicUsize,
    statistics: AtomicUsize,
    action: AtomicUsize,
}

impl LoadingRegions {
    fn counter(&self, region: LoadingRegion) -> &AtomicUsize {
        match region {
            LoadingRegion::JobList => &self.job_list,
            LoadingRegion::Categories => &self.categories,
            LoadingRegion::Statistics => &self.statistics,
            LoadingRegion::Action => &self.action,
        }
    }

    pub fn is_loading(&self, region: LoadingRegion) -> bool {
        self.counter(region).load(Ordering::Acquire) > 0
    }

    /// Marks `region` as loading until the returned guard is dropped.
    pub fn begin(self: &Arc<Self>, region: LoadingRegion) -> LoadingGuard {
        self.counter(region).fetch_add(1, Ordering::AcqRel);
        LoadingGuard { regions: Arc::clone(self), region }
    }
}

#[derive(Debug)]
pub struct LoadingGuard {
    regions: Arc<LoadingRegions>,
    region: LoadingRegion,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.regions.counter(self.region).fetch_sub(1, Ordering::AcqRel);
    }
}
