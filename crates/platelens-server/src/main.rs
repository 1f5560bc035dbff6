//! platelens-server - HTTP entry point for food photo analysis
//!
//! Proxies three external services (vision labeling, nutrition lookup,
//! recipe lookup) behind a single POST /analyze endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use platelens_app::{AnalysisPipeline, Config};
use platelens_server::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "platelens-server", about = "Food photo analysis server")]
struct Args {
    /// Port override (defaults to the configured port)
    #[arg(long)]
    port: Option<u16>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    if config.vision_api_key.is_empty() {
        info!("vision API key is unset; /analyze will fail until one is configured");
    }

    let pipeline = Arc::new(AnalysisPipeline::from_config(&config));
    let state = AppState::new(pipeline);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("platelens-server listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
