use clap::Args;
use url::Url;

/// Parameters used to reach the Job API.
#[derive(Debug, Clone, Args)]
pub struct ApiCliArgs {
    /// Base URL of the Job API, e.g. https://<id>.execute-api.<region>.amazonaws.com/dev
    #[arg(env = "JOBHUB_API_URL", long, global = true)]
    pub api_url: Option<Url>,

    /// Identity token (JWT) of the signed-in user.
    #[arg(env = "JOBHUB_ID_TOKEN", long, global = true, hide_env_values = true)]
    pub id_token: Option<String>,

    /// Total timeout for each request, in seconds.
    #[arg(env = "JOBHUB_REQUEST_TIMEOUT_SECONDS", long, global = true)]
    pub request_timeout_seconds: Option<u64>,
}
