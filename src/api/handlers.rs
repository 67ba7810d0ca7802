// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word lookup endpoint handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::errors::ApiErrorResponse;
use super::response::ApiResponse;
use super::server::AppState;
use crate::scrape::ScrapeSession;
use crate::words::WordEntry;

/// `?page=` query parameter
///
/// Missing, non-numeric and zero values all mean page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<u32>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /v1/words/:word - scrape session for a word
///
/// # Errors
/// - 404 Not Found: no page produced any word
/// - 502 Bad Gateway: the first page could not be fetched or parsed
/// - 504 Gateway Timeout: the deadline passed before the first page
pub async fn word_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<ScrapeSession>>, ApiErrorResponse> {
    let session = lookup(&state, &word, query.page_number()).await?;
    let pagination = session.last_pagination();
    Ok(Json(ApiResponse::new(session).with_pagination(pagination)))
}

/// GET /v1/words/:word/entries - normalized, translated word entries
pub async fn entries_handler(
    State(state): State<AppState>,
    Path(word): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<Vec<WordEntry>>>, ApiErrorResponse> {
    let session = lookup(&state, &word, query.page_number()).await?;
    let entries = state.normalizer.normalize(&session).await;
    info!("Built {} entries for '{}'", entries.len(), word);
    Ok(Json(
        ApiResponse::new(entries).with_pagination(session.last_pagination()),
    ))
}

/// Run one search bounded by the request deadline
async fn lookup(state: &AppState, word: &str, page: u32) -> Result<ScrapeSession, ApiErrorResponse> {
    debug!("Lookup request: '{}' page {}", word, page);

    let cancel = CancellationToken::new();
    let deadline = {
        let cancel = cancel.clone();
        let timeout = state.request_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            cancel.cancel();
        })
    };

    let result = state.orchestrator.search(word, page, &cancel).await;
    deadline.abort();

    match result {
        Ok(session) => {
            if session.stop_reason.is_truncated() {
                debug!(
                    "Lookup for '{}' truncated after {} pages: {:?}",
                    word,
                    session.pages.len(),
                    session.stop_reason
                );
            }
            Ok(session)
        }
        Err(failure) => {
            warn!("Lookup for '{}' failed: {}", word, failure);
            Err(failure.into())
        }
    }
}
