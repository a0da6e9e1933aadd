use clap::Parser;
use tmhi_server::cli::Args;
use tmhi_server::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    init_logging(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        min_bars = config.monitor.min_bars,
        debug = config.monitor.debug,
        "Starting TMHI signal monitor"
    );

    tmhi_server::run(config).await
}
