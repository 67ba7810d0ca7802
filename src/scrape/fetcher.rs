// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Results page fetching
//!
//! One HTTP GET per (query, page) pair, bounded by a per-page timeout and
//! the shared outbound rate limit.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::config::ScrapeConfig;
use super::rate_limiter::FetchRateLimiter;
use super::types::{FetchError, RawPage};

/// Source of raw results pages
///
/// The orchestrator only depends on this trait, so tests can script the
/// remote site page by page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one results page for `query`
    async fn fetch(&self, query: &str, page: u32) -> Result<RawPage, FetchError>;

    /// Fetcher name for logging
    fn name(&self) -> &'static str;
}

/// Fetches results pages from the remote dictionary over HTTP
pub struct HttpPageFetcher {
    client: Client,
    config: ScrapeConfig,
    rate_limiter: FetchRateLimiter,
}

impl HttpPageFetcher {
    /// Create a fetcher from configuration
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_per_page_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| FetchError::ClientBuild {
                reason: e.to_string(),
            })?;
        let rate_limiter = FetchRateLimiter::new(config.rate_limit_per_minute);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Build the search URL for a (query, page) pair
    ///
    /// Parameters are form-urlencoded, so reserved characters and
    /// non-ASCII letters are percent-encoded as UTF-8.
    pub fn search_url(&self, query: &str, page: u32) -> Result<Url, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidPage { page });
        }

        let base = Url::parse(&self.config.base_url).map_err(|e| FetchError::InvalidUrl {
            reason: e.to_string(),
        })?;
        let mut url = base
            .join(&self.config.search_path)
            .map_err(|e| FetchError::InvalidUrl {
                reason: e.to_string(),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            for id in &self.config.dictionary_ids {
                pairs.append_pair("ld", &id.to_string());
            }
            pairs
                .append_pair("query", query)
                .append_pair("page", &page.to_string())
                .append_pair("SearchIn", &self.config.search_in);
        }

        Ok(url)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, query: &str, page: u32) -> Result<RawPage, FetchError> {
        let url = self.search_url(query, page)?;
        let url_string = url.to_string();

        self.rate_limiter.wait().await;
        debug!("Fetching results page {} for '{}': {}", page, query, url_string);

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url_string.clone(),
                }
            } else {
                FetchError::Transport {
                    url: url_string.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url_string,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url_string.clone(),
                }
            } else {
                FetchError::Malformed {
                    url: url_string.clone(),
                    reason: e.to_string(),
                }
            }
        })?;

        info!("Fetched {} bytes from: {}", body.len(), url_string);

        Ok(RawPage {
            query: query.to_string(),
            page_number: page,
            url: url_string,
            markup: body.to_vec(),
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
