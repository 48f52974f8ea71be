pub mod auth;
pub mod job_api;

pub use auth::AuthProvider;
pub use job_api::JobApi;
