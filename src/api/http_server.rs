// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use super::handlers::{health_handler, home_handler};
use super::scan::scan_handler;
use crate::config::ServerConfig;
use crate::vision::{AnswerTemplate, TemplateError};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub template: Arc<AnswerTemplate>,
}

impl AppState {
    pub fn new(template: AnswerTemplate) -> Self {
        Self {
            template: Arc::new(template),
        }
    }

    /// State backed by the compiled-in sheet layout
    pub fn with_standard_template() -> Result<Self, TemplateError> {
        AnswerTemplate::standard().map(Self::new)
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Upload page
        .route("/", get(home_handler))
        // Health check
        .route("/health", get(health_handler))
        // Scan endpoint
        .route("/api/scan", post(scan_handler))
        // Uploads are not size-limited
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on {}", addr);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
