// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrape session normalization
//!
//! Groups extracted records by headword and attaches translations.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use super::types::{DictionaryExplanation, WordEntry};
use crate::scrape::ScrapeSession;
use crate::translate::Translator;

/// Translation requests in flight at once per session
pub const DEFAULT_MAX_CONCURRENT_TRANSLATIONS: usize = 4;

/// Turns scrape sessions into word entries
pub struct WordNormalizer {
    translator: Arc<dyn Translator>,
    max_concurrent: usize,
}

impl WordNormalizer {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            max_concurrent: DEFAULT_MAX_CONCURRENT_TRANSLATIONS,
        }
    }

    /// Limit concurrent translation requests (at least one)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Group every extracted record of the session into one entry per headword
    ///
    /// Entries keep the order in which headwords first appear. Each entry
    /// is translated once, at most `max_concurrent` at a time; translation
    /// failures leave `translation` empty.
    pub async fn normalize(&self, session: &ScrapeSession) -> Vec<WordEntry> {
        let mut entries = group_words(session);

        let requests: Vec<_> = entries
            .iter()
            .map(|entry| self.translator.translate(&entry.name, &entry.language))
            .collect();
        let translations: Vec<_> = stream::iter(requests)
            .buffered(self.max_concurrent)
            .collect()
            .await;

        for (entry, translation) in entries.iter_mut().zip(translations) {
            match translation {
                Ok(translation) => entry.translation = Some(translation),
                Err(e) => warn!(
                    "{} translation of '{}' failed: {}",
                    self.translator.name(),
                    entry.name,
                    e
                ),
            }
        }

        entries
    }
}

fn group_words(session: &ScrapeSession) -> Vec<WordEntry> {
    let mut entries: Vec<WordEntry> = Vec::new();

    for word in session.words() {
        if word.surface_form.is_empty() {
            debug!("Dropping record without headword from '{}'", word.source_url);
            continue;
        }

        let index = match entries.iter().position(|e| e.name == word.surface_form) {
            Some(index) => index,
            None => {
                entries.push(WordEntry::new(&word.surface_form, ""));
                entries.len() - 1
            }
        };

        let entry = &mut entries[index];
        if entry.language.is_empty() {
            entry.language = word.source_language.clone();
        }
        entry.dictionaries.push(DictionaryExplanation {
            explanations: word.explanations.clone(),
            dictionary_name: word.dictionary_name.clone(),
            source: word.source_url.clone(),
        });
    }

    entries
}
