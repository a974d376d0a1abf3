use anyhow::Context;
use ask_chat::{app, config::initialize_config, logging::init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = initialize_config().context("failed to load configuration")?;
    let _logger = init_logging(&config).context("failed to start logging")?;

    log::info!("asking {}", config.endpoint);
    app::run(&config).await?;
    log::info!("bye");

    Ok(())
}
