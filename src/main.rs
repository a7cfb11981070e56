use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use loadforge_flood::config::{ServerConfig, DEFAULT_CONFIG_PATH};
use loadforge_flood::executor::FloodEngine;
use loadforge_flood::server;
use loadforge_flood::utils::hardware::HostInfo;

#[derive(Parser)]
#[command(about = "HTTP-triggered GET flood")]
struct Args {
    /// Path to the TOML config file
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    info!(host = %HostInfo::collect(), "host");

    let flood_runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("flood-worker")
        .build()
        .context("building flood runtime")?;
    let engine = FloodEngine::new(flood_runtime.handle().clone(), config.attempt_timeout());

    println!(
        "{} {}",
        "Starting HTTP server on".green().bold(),
        format!("\"{}{}\"", config.listen, config.path).bold()
    );

    let served = actix_web::rt::System::new().block_on(server::serve(&config, engine));

    flood_runtime.shutdown_background();
    served.context("HTTP server")
}
