// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for dictionary scraping

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of results per page on the remote dictionary (fixed by the site)
pub const PAGE_SIZE: u32 = 10;

/// Raw markup for one (query, page) pair, consumed immediately by the parser
#[derive(Debug, Clone)]
pub struct RawPage {
    /// The search query as typed by the user
    pub query: String,
    /// Requested page number (starts at 1)
    pub page_number: u32,
    /// Exact URL the markup was fetched from
    pub url: String,
    /// Undecoded response body
    pub markup: Vec<u8>,
}

/// Semantic kind of a results section, derived from its header text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Entries whose headword matches the query
    Main,
    /// Cross-language renderings of the query
    Translate,
    /// Unrelated entries that only mention the query
    Others,
    /// Header text did not match any known marker
    Unknown,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Translate => "translate",
            Self::Others => "others",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized word record extracted from a results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedWord {
    /// Written form of the entry
    pub surface_form: String,
    /// Short language code ("sl", "en", ...), empty when undetermined
    pub source_language: String,
    /// Explanations in document order
    pub explanations: Vec<String>,
    /// Source dictionary name without the "Vir: " prefix
    pub dictionary_name: String,
    /// URL of the results page the entry was found on
    pub source_url: String,
}

/// Words of one classified results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResult {
    pub kind: SectionKind,
    pub words: Vec<ExtractedWord>,
}

impl SectionResult {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            words: Vec::new(),
        }
    }
}

/// Pagination control state of one fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl PaginationState {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// Everything extracted from one fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Page number that was requested
    pub page_number: u32,
    /// Results sections in document order
    pub sections: Vec<SectionResult>,
    pub pagination: PaginationState,
}

impl PageResult {
    /// Sections worth paginating for (everything except tangential mentions)
    pub fn relevant_sections(&self) -> impl Iterator<Item = &SectionResult> {
        self.sections
            .iter()
            .filter(|section| section.kind != SectionKind::Others)
    }

    /// True when at least one non-Others section produced a word
    pub fn has_relevant_words(&self) -> bool {
        self.relevant_sections()
            .any(|section| !section.words.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.sections.iter().map(|section| section.words.len()).sum()
    }
}

/// Why the orchestrator stopped requesting further pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The last fetched page was the final page
    LastPage,
    /// The last fetched page held only tangential (Others) results
    OnlyTangentialResults,
    /// The hard page cap was reached
    PageCapReached,
    /// A page after the first failed to fetch or parse
    PageFailed,
    /// The caller cancelled the search
    Cancelled,
}

impl StopReason {
    /// True when pagination ended before the source ran out of pages
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::PageFailed | Self::Cancelled)
    }
}

/// Accumulated result of one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSession {
    pub query: String,
    pub pages: Vec<PageResult>,
    pub stop_reason: StopReason,
}

impl ScrapeSession {
    /// Pagination of the most recently fetched page
    pub fn last_pagination(&self) -> PaginationState {
        self.pages
            .last()
            .map(|page| page.pagination)
            .unwrap_or_default()
    }

    /// All extracted words across pages and sections, in encounter order
    pub fn words(&self) -> impl Iterator<Item = &ExtractedWord> {
        self.pages
            .iter()
            .flat_map(|page| page.sections.iter())
            .flat_map(|section| section.words.iter())
    }
}

/// Errors raised while fetching a results page
#[derive(Debug, Error)]
pub enum FetchError {
    /// Page numbers start at 1
    #[error("Invalid page number {page}, pages start at 1")]
    InvalidPage { page: u32 },

    /// Search URL could not be built from the configuration
    #[error("Invalid search URL: {reason}")]
    InvalidUrl { reason: String },

    /// HTTP client could not be constructed
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },

    /// Request exceeded the per-page timeout
    #[error("Timeout fetching: {url}")]
    Timeout { url: String },

    /// Transport level failure
    #[error("HTTP error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status code
    #[error("HTTP {status} for: {url}")]
    HttpStatus { status: u16, url: String },

    /// Response arrived but its body was unusable
    #[error("Malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

/// Markup that could not be structured at all
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Document is empty")]
    EmptyDocument,

    #[error("Document is not valid UTF-8: {reason}")]
    InvalidEncoding { reason: String },
}

/// Failure of a single page, either while fetching or while parsing
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Outcome of a search that produced no usable session
#[derive(Debug, Error)]
pub enum ScrapeFailure {
    /// The first page could not be fetched or parsed
    #[error("Dictionary source unreachable: {0}")]
    RemoteUnreachable(#[source] PageError),

    /// The source answered but nothing matched the query
    #[error("No results found for '{query}'")]
    NoResultsFound { query: String },

    /// Cancelled before the first page completed
    #[error("Search cancelled before any page was fetched")]
    Cancelled,
}
