use clap::Parser;
use tracing::debug;

use fixture_watch::app::AppContext;
use fixture_watch::cli::Cli;
use fixture_watch::config::{EmailCredentials, Settings};
use fixture_watch::logging;
use fixture_watch::poller::{Poller, RetryPolicy};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env file is fine; credentials may come from the environment.
    let dotenv = dotenvy::dotenv();

    logging::init(cli.log.as_deref())?;

    if let Ok(path) = &dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let config = cli.to_config();

    let ctx = AppContext::new(&settings, &config, EmailCredentials::from_env())?;
    let retry = RetryPolicy::new(&settings.retry);

    Poller::new(ctx, config, retry).run().await?;

    Ok(())
}
