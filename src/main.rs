use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod core;
mod resolvers;
mod utils;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("starting linkbot v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
