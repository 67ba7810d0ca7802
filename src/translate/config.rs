// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for word translation

use std::env;

use url::Url;

/// Configuration for the translation service
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Whether words are translated at all (default: true)
    pub enabled: bool,
    /// Base URL of the translate endpoint (default: https://translate.googleapis.com)
    pub api_url: String,
    /// Request timeout in seconds (default: 5)
    pub timeout_secs: u64,
}

impl TranslateConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env::var("TRANSLATE_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            api_url: env::var("TRANSLATE_API_URL").unwrap_or(defaults.api_url),
            timeout_secs: env::var("TRANSLATE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }
        if let Err(e) = Url::parse(&self.api_url) {
            return Err(format!("api_url is not a valid URL: {}", e));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 5,
        }
    }
}
