// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use exam_scanner::{
    api::{start_server, AppState},
    config::ServerConfig,
    version,
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();
    info!("Starting {} v{}", version::SERVICE_NAME, version::VERSION);

    // A broken layout is a configuration error, not a per-request one
    let state = AppState::with_standard_template().context("invalid answer template")?;
    info!("Answer template loaded: {} questions", state.template.len());

    start_server(&config, state).await
}
