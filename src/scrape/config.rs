// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for dictionary scraping
//!
//! Defines the remote search endpoint, per-page timeouts, the pagination
//! cap and the outbound request rate.

use std::env;

use url::Url;

/// Hard upper bound for `max_additional_pages`
pub const MAX_ADDITIONAL_PAGES_LIMIT: u32 = 10;

/// Configuration for scraping the remote dictionary
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Base URL of the dictionary site (default: https://www.termania.net)
    pub base_url: String,
    /// Path of the search endpoint (default: /iskanje)
    pub search_path: String,
    /// Dictionary ids sent as repeated `ld` parameters (default: 58, 122)
    pub dictionary_ids: Vec<u32>,
    /// Value of the `SearchIn` parameter (default: Linked)
    pub search_in: String,
    /// Timeout per page fetch in seconds (default: 10)
    pub timeout_per_page_secs: u64,
    /// Pages fetched beyond the first one at most (default: 3)
    pub max_additional_pages: u32,
    /// Outbound page fetches allowed per minute (default: 60)
    pub rate_limit_per_minute: u32,
    /// User-Agent header for page fetches
    pub user_agent: String,
}

impl ScrapeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("DICTIONARY_BASE_URL").unwrap_or(defaults.base_url),
            search_path: env::var("DICTIONARY_SEARCH_PATH").unwrap_or(defaults.search_path),
            dictionary_ids: env::var("DICTIONARY_IDS")
                .ok()
                .map(|v| parse_id_list(&v))
                .unwrap_or(defaults.dictionary_ids),
            search_in: env::var("DICTIONARY_SEARCH_IN").unwrap_or(defaults.search_in),
            timeout_per_page_secs: env::var("DICTIONARY_TIMEOUT_PER_PAGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_per_page_secs),
            max_additional_pages: env::var("DICTIONARY_MAX_ADDITIONAL_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_additional_pages)
                .min(MAX_ADDITIONAL_PAGES_LIMIT),
            rate_limit_per_minute: env::var("DICTIONARY_RATE_LIMIT_PER_MINUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rate_limit_per_minute),
            user_agent: env::var("DICTIONARY_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Err(e) = Url::parse(&self.base_url) {
            return Err(format!("base_url is not a valid URL: {}", e));
        }
        if self.dictionary_ids.is_empty() {
            return Err("dictionary_ids must contain at least one id".to_string());
        }
        if self.timeout_per_page_secs == 0 {
            return Err("timeout_per_page_secs must be at least 1".to_string());
        }
        if self.rate_limit_per_minute == 0 {
            return Err("rate_limit_per_minute must be at least 1".to_string());
        }
        if self.max_additional_pages > MAX_ADDITIONAL_PAGES_LIMIT {
            return Err(format!(
                "max_additional_pages cannot exceed {}",
                MAX_ADDITIONAL_PAGES_LIMIT
            ));
        }
        Ok(())
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.termania.net".to_string(),
            search_path: "/iskanje".to_string(),
            dictionary_ids: vec![58, 122],
            search_in: "Linked".to_string(),
            timeout_per_page_secs: 10,
            max_additional_pages: 3,
            rate_limit_per_minute: 60,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

fn parse_id_list(value: &str) -> Vec<u32> {
    value
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}
