// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Google Translate (public `gtx` client) translator
//!
//! Uses the keyless `translate_a/single` endpoint. The response is a nested
//! JSON array whose `[0][0][0]` element holds the translated text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::config::TranslateConfig;
use super::provider::{target_language, TranslateError, Translation, Translator};

/// Translator backed by the public Google Translate endpoint
pub struct GoogleTranslator {
    client: Client,
    api_url: String,
}

impl GoogleTranslator {
    /// Create a translator from configuration
    pub fn new(config: &TranslateConfig) -> Result<Self, TranslateError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    fn request_url(&self, word: &str, from: &str, to: &str) -> Result<Url, TranslateError> {
        // a trailing slash keeps any path prefix of the base when joining
        let base = if self.api_url.ends_with('/') {
            self.api_url.clone()
        } else {
            format!("{}/", self.api_url)
        };
        let mut url = Url::parse(&base)
            .and_then(|base| base.join("translate_a/single"))
            .map_err(|e| TranslateError::InvalidResponse {
                reason: format!("invalid api_url: {}", e),
            })?;

        let source = if from.is_empty() { "auto" } else { from };
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", source)
            .append_pair("tl", to)
            .append_pair("dt", "t")
            .append_pair("q", word);

        Ok(url)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, word: &str, from: &str) -> Result<Translation, TranslateError> {
        let to = target_language(from);
        let url = self.request_url(word, from, to)?;

        debug!("Translating '{}' from '{}' to '{}'", word, from, to);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await?;
        let translated = parse_translation(&body)?;
        if translated.trim().is_empty() {
            return Err(TranslateError::EmptyTranslation {
                word: word.to_string(),
            });
        }

        Ok(Translation {
            language: to.to_string(),
            word: translated.trim().to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

fn parse_translation(body: &Value) -> Result<&str, TranslateError> {
    body.get(0)
        .and_then(|segments| segments.get(0))
        .and_then(|segment| segment.get(0))
        .and_then(Value::as_str)
        .ok_or_else(|| TranslateError::InvalidResponse {
            reason: "missing [0][0][0] text".to_string(),
        })
}
