use std::io;

use anyhow::Context;
use clap::Parser;
use guard_proxy::cli::Args;
use guard_proxy::config::Config;
use guard_proxy::server;
use guard_proxy::state::AppState;
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = Config::from_args(args)?;
    let listen_addr = config.listen_addr;
    tracing::info!(
        addr = %listen_addr,
        model = %config.model,
        guard_enabled = config.guard_enabled,
        enforce_side = ?config.enforce_side,
        "starting guard proxy"
    );
    let state = AppState::new(config);
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    axum::serve(listener, server::router(state)).await?;
    Ok(())
}

fn init_tracing() {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);
    tracing_subscriber::registry().with(layer).init();
}
