// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote dictionary scraping
//!
//! Extracts structured word data from the termania.net search results
//! pages. The markup has no schema: meaning lives in nesting position,
//! class names and localized header strings.
//!
//! ## Architecture
//!
//! ```text
//! query ─► PageFetcher ─► RawPage ─► document::parse ─► DocumentView
//!                                                        │
//!              page-header ─► SectionClassifier ─► SectionKind
//!              results     ─► extract_section   ─► SectionResult
//!              pagination  ─► extract_pagination ─► PaginationState
//!                                                        │
//!                        ScrapeOrchestrator ◄─ PageResult ┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let config = ScrapeConfig::from_env();
//! let fetcher = Arc::new(HttpPageFetcher::new(config.clone())?);
//! let orchestrator = ScrapeOrchestrator::from_config(fetcher, &config);
//!
//! let session = orchestrator.search("miza", 1, &CancellationToken::new()).await?;
//! ```

pub mod classifier;
pub mod config;
pub mod diacritics;
pub mod document;
pub mod extractor;
pub mod fetcher;
pub mod orchestrator;
pub mod pagination;
pub mod rate_limiter;
pub mod types;

pub use classifier::{SectionClassifier, SectionMarker};
pub use config::ScrapeConfig;
pub use diacritics::strip_diacritics;
pub use document::{DocumentView, Node, TagNode, TextNode};
pub use extractor::extract_section;
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use orchestrator::{Continuation, ScrapeOrchestrator};
pub use pagination::extract_pagination;
pub use rate_limiter::FetchRateLimiter;
pub use types::{
    ExtractedWord, FetchError, PageError, PageResult, PaginationState, ParseError, RawPage,
    ScrapeFailure, ScrapeSession, SectionKind, SectionResult, StopReason, PAGE_SIZE,
};
