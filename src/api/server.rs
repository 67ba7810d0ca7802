// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{routing::get, Router};
use std::{sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::ApiConfig;
use super::handlers::{entries_handler, health_handler, word_handler};
use crate::scrape::ScrapeOrchestrator;
use crate::words::WordNormalizer;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScrapeOrchestrator>,
    pub normalizer: Arc<WordNormalizer>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        orchestrator: ScrapeOrchestrator,
        normalizer: WordNormalizer,
        request_timeout: Duration,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            normalizer: Arc::new(normalizer),
            request_timeout,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Word lookup
        .route("/v1/words/:word", get(word_handler))
        .route("/v1/words/:word/entries", get(entries_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(state: AppState, config: &ApiConfig) -> anyhow::Result<()> {
    let app = create_app(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
