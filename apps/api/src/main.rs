mod batch;
mod cli;
mod config;
mod errors;
mod export;
mod extraction;
mod inference;
mod render;
mod results;
mod resumes;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so `scan`/`parse` can stream CSV on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Scan { dir, output } => cli::run_scan(&config, &dir, output.as_deref()),
        Command::Parse { files, output } => cli::run_parse(&config, &files, output.as_deref()),
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting resume parser v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.clone())?;
    match &state.storage {
        Some(storage) => info!("Working storage at {}", storage.root().display()),
        None => info!("Upload persistence disabled"),
    }
    info!(
        "Inference: name window {} chars, email window {:?}",
        config.inference.name_window_chars, config.inference.email_window_chars
    );

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
