use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use help_skill::aggregator::Aggregator;
use help_skill::api::{AppState, create_router};
use help_skill::config::Config;

#[derive(Debug, Parser)]
#[command(name = "help-skill", version, about = "Chat-bot skill answering questions from product documentation search")]
struct Cli {
    /// Env file to load before reading the environment (default: ./.env if present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Port to listen on, overrides PORT
    #[arg(long)]
    port: Option<u16>,

    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: tracing::Level,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    // Bridge log crate -> tracing (so log::info! etc. work)
    tracing_log::LogTracer::init()?;

    let mut config = match &cli.env_file {
        Some(path) => Config::from_env_file(path)?,
        None => Config::from_env()?,
    };
    if let Some(port) = cli.port {
        config.port = port;
    }

    let engine = Aggregator::from_config(&config.engine).context("failed to build search client")?;
    let shutdown = CancellationToken::new();
    let app = create_router(AppState::new(engine, shutdown.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!(
        "starting to serve on {} (upstream {})",
        addr,
        config.engine.search_api_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            log::info!("shutting down");
            shutdown.cancel();
        })
        .await?;
    Ok(())
}
