//! Server entry point.
//!
//! # Responsibility
//! - Parse configuration and start logging before anything else runs.
//! - Hand over to `featuremap_server::run`.

use anyhow::Context as _;
use clap::Parser;
use featuremap_core::init_logging;
use featuremap_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    init_logging(config.log_level(), config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    featuremap_server::run(config).await
}
