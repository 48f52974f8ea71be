use clap::Parser as _;
use dotenvy::dotenv;
use jobhub::cli::{run, Cli};
use jobhub::utils::logging::init_logging;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    init_logging()?;
    let cli = Cli::parse();
    debug!(command = ?cli.command, role = %cli.board.role, "Starting jobhub");

    if let Err(e) = run(cli).await {
        error!(error = %e, error_chain = ?e, "Command failed");
        std::process::exit(1);
    }
    Ok(())
}
