//! List query builder: filter and page state in, normalized [`ListQuery`] out.
//!
//! [`ListQuery`]: crate::types::list::ListQuery

pub mod builder;
pub mod debounce;
pub mod local;
pub mod sequencer;

pub use builder::{build_query, total_pages, FilterState, PageState, DEFAULT_ITEMS_PER_PAGE};
pub use sequencer::{QuerySequencer, QueryTicket};
