// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Translator trait definition

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Language code of the dictionary site's own language
pub const SITE_LANGUAGE: &str = "sl";

/// Language Slovene words are translated into
pub const FOREIGN_LANGUAGE: &str = "en";

/// A translated word with its target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language: String,
    pub word: String,
}

/// Translation errors
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation is disabled")]
    Disabled,

    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid translation response: {reason}")]
    InvalidResponse { reason: String },

    #[error("Empty translation for '{word}'")]
    EmptyTranslation { word: String },
}

/// Target language for a word in `from`
///
/// Slovene words go to English, everything else to Slovene.
pub fn target_language(from: &str) -> &'static str {
    if from == SITE_LANGUAGE {
        FOREIGN_LANGUAGE
    } else {
        SITE_LANGUAGE
    }
}

/// Trait for translating single words
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `word` from language `from` into [`target_language`]`(from)`
    async fn translate(&self, word: &str, from: &str) -> Result<Translation, TranslateError>;

    /// Translator name for logging
    fn name(&self) -> &'static str;
}

/// Translator used when translation is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _word: &str, _from: &str) -> Result<Translation, TranslateError> {
        Err(TranslateError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}
