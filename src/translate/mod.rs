// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Word translation
//!
//! Translates headwords between Slovene and English for the word entries
//! built from scrape results.

pub mod config;
pub mod google;
pub mod provider;

pub use config::TranslateConfig;
pub use google::GoogleTranslator;
pub use provider::{
    target_language, DisabledTranslator, TranslateError, Translation, Translator,
};

#[cfg(test)]
pub use provider::MockTranslator;

use std::sync::Arc;

/// Build the translator selected by configuration
pub fn translator_from_config(config: &TranslateConfig) -> Result<Arc<dyn Translator>, TranslateError> {
    if !config.enabled {
        return Ok(Arc::new(DisabledTranslator));
    }
    Ok(Arc::new(GoogleTranslator::new(config)?))
}
