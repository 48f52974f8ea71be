pub mod env_utils;
pub mod http_client;
