//! Lineage server entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lineage_api::ApiServer;
use lineage_config::ConfigManager;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lineage-server")]
#[command(version, about = "Serve Lineage genealogy pages")]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "LINEAGE_CONFIG", default_value = "lineage.toml")]
    config: PathBuf,

    /// Listen address, overriding the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overriding the configuration file
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ConfigManager::with_path(cli.config.clone())
        .load_validated()
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!("Starting Lineage server...");

    let server = ApiServer::new(config).context("building server")?;
    server.run().await?;

    Ok(())
}
