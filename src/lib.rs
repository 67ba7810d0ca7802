// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod scrape;
pub mod translate;
pub mod version;
pub mod words;

// Re-export main types
pub use scrape::{
    ExtractedWord, HttpPageFetcher, PageFetcher, PageResult, PaginationState, ScrapeConfig,
    ScrapeFailure, ScrapeOrchestrator, ScrapeSession, SectionKind, StopReason,
};
pub use translate::{TranslateConfig, Translation, Translator};
pub use words::{DictionaryExplanation, WordEntry, WordNormalizer};
