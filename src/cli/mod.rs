// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One-shot dictionary lookup from the command line

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::scrape::config::MAX_ADDITIONAL_PAGES_LIMIT;
use crate::scrape::{HttpPageFetcher, ScrapeConfig, ScrapeOrchestrator};
use crate::translate::{translator_from_config, TranslateConfig};
use crate::words::WordNormalizer;

/// Fabstir Dictionary lookup CLI
#[derive(Parser, Debug)]
#[command(name = "lookup-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Look up a word in the termania.net dictionaries", long_about = None)]
pub struct Cli {
    /// Word to look up
    pub word: String,

    /// Results page to start from
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Pages fetched after the first one at most
    #[arg(long, env = "DICTIONARY_MAX_ADDITIONAL_PAGES")]
    pub max_pages: Option<u32>,

    /// Print translated word entries instead of the raw session
    #[arg(long)]
    pub translate: bool,
}

/// Execute the lookup and print pretty JSON to stdout
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = ScrapeConfig::from_env();
    if let Some(max_pages) = cli.max_pages {
        config.max_additional_pages = max_pages.min(MAX_ADDITIONAL_PAGES_LIMIT);
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid scrape configuration: {}", e))?;

    let fetcher = Arc::new(HttpPageFetcher::new(config.clone())?);
    let orchestrator = ScrapeOrchestrator::from_config(fetcher, &config);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let session = orchestrator
        .search(&cli.word, cli.page, &cancel)
        .await
        .with_context(|| format!("Lookup of '{}' failed", cli.word))?;

    let output = if cli.translate {
        let translate_config = TranslateConfig {
            enabled: true,
            ..TranslateConfig::from_env()
        };
        let normalizer = WordNormalizer::new(translator_from_config(&translate_config)?);
        serde_json::to_string_pretty(&normalizer.normalize(&session).await)?
    } else {
        serde_json::to_string_pretty(&session)?
    };

    println!("{}", output);
    Ok(())
}
