//! Client core of the JobHub marketplace: the job lifecycle authority, the list query builder
//! and the board controller that drives them against the Job API.

pub mod board;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod forms;
pub mod lifecycle;
pub mod metrics;
pub mod query;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use error::{JobHubError, JobHubResult};
