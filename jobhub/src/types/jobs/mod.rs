pub mod job_item;
pub mod requests;
pub mod types;
