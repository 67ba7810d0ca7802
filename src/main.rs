// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use fabstir_dictionary_node::{
    api::{start_server, ApiConfig, AppState},
    scrape::{HttpPageFetcher, ScrapeConfig, ScrapeOrchestrator},
    translate::{translator_from_config, TranslateConfig},
    version,
    words::WordNormalizer,
};
use std::{env, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting {}", version::get_version_string());

    let scrape_config = ScrapeConfig::from_env();
    scrape_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid scrape configuration: {}", e))?;

    let translate_config = TranslateConfig::from_env();
    translate_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid translate configuration: {}", e))?;

    let api_config = ApiConfig::from_env();
    api_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid API configuration: {}", e))?;

    tracing::info!(
        "Dictionary: {}{} (ids {:?}, up to {} extra pages, {} req/min)",
        scrape_config.base_url,
        scrape_config.search_path,
        scrape_config.dictionary_ids,
        scrape_config.max_additional_pages,
        scrape_config.rate_limit_per_minute
    );

    let fetcher = Arc::new(HttpPageFetcher::new(scrape_config.clone())?);
    let orchestrator = ScrapeOrchestrator::from_config(fetcher, &scrape_config);

    let translator = translator_from_config(&translate_config)?;
    tracing::info!("Translator: {}", translator.name());
    let normalizer = WordNormalizer::new(translator);

    let state = AppState::new(
        orchestrator,
        normalizer,
        Duration::from_secs(api_config.request_timeout_secs),
    );

    start_server(state, &api_config).await
}
