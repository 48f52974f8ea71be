pub mod actor;
pub mod category;
pub mod jobs;
pub mod list;
pub mod statistics;
