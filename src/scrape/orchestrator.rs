// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrape orchestration
//!
//! Drives fetch → parse → classify → extract for one page at a time and
//! decides after each page whether the next one is worth fetching.
//!
//! ```text
//! Start ──► AwaitingPage(n) ──► HaveLastPage ──► Done
//!                │   ▲
//!                │   └── next page allowed
//!                └──► Aborted (first page failed)
//! ```

use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::classifier::SectionClassifier;
use super::config::ScrapeConfig;
use super::document::{self, DocumentView};
use super::extractor::extract_section;
use super::fetcher::PageFetcher;
use super::pagination::extract_pagination;
use super::types::{
    PageError, PageResult, PaginationState, ScrapeFailure, ScrapeSession, SectionKind, StopReason,
};

/// Default number of pages fetched after the first one
pub const DEFAULT_MAX_ADDITIONAL_PAGES: u32 = 3;

enum ScrapeState {
    Start,
    AwaitingPage(u32),
    HaveLastPage(StopReason),
    Aborted(ScrapeFailure),
    Done(StopReason),
}

/// Decision taken after a page has been added to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    Fetch(u32),
    Stop(StopReason),
}

/// Composes fetching, parsing and extraction into a bounded page sequence
///
/// Holds no per-search state; concurrent searches only share the fetcher.
pub struct ScrapeOrchestrator {
    fetcher: Arc<dyn PageFetcher>,
    classifier: SectionClassifier,
    max_additional_pages: u32,
}

impl ScrapeOrchestrator {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            classifier: SectionClassifier::default(),
            max_additional_pages: DEFAULT_MAX_ADDITIONAL_PAGES,
        }
    }

    /// Create an orchestrator using the page cap from configuration
    pub fn from_config(fetcher: Arc<dyn PageFetcher>, config: &ScrapeConfig) -> Self {
        Self::new(fetcher).with_max_additional_pages(config.max_additional_pages)
    }

    pub fn with_max_additional_pages(mut self, max_additional_pages: u32) -> Self {
        self.max_additional_pages = max_additional_pages;
        self
    }

    pub fn with_classifier(mut self, classifier: SectionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn max_additional_pages(&self) -> u32 {
        self.max_additional_pages
    }

    /// Search the remote dictionary starting at `start_page`
    ///
    /// A failure on the first page aborts the search. Later failures and
    /// cancellation stop pagination and return the pages gathered so far.
    pub async fn search(
        &self,
        query: &str,
        start_page: u32,
        cancel: &CancellationToken,
    ) -> Result<ScrapeSession, ScrapeFailure> {
        let started = Instant::now();
        let mut pages: Vec<PageResult> = Vec::new();
        let mut state = ScrapeState::Start;

        let stop_reason = loop {
            state = match state {
                ScrapeState::Start => ScrapeState::AwaitingPage(start_page.max(1)),
                ScrapeState::AwaitingPage(page_number) => {
                    match self.fetch_page(query, page_number, cancel).await {
                        Ok(Some(page)) => {
                            let next = self.continuation(&page, pages.len() + 1);
                            debug!(
                                "Page {} of '{}': {} words, pagination {}/{}, next {:?}",
                                page_number,
                                query,
                                page.word_count(),
                                page.pagination.current_page,
                                page.pagination.total_pages,
                                next
                            );
                            pages.push(page);
                            match next {
                                Continuation::Fetch(next_page) => ScrapeState::AwaitingPage(next_page),
                                Continuation::Stop(reason) => ScrapeState::HaveLastPage(reason),
                            }
                        }
                        Ok(None) if pages.is_empty() => ScrapeState::Aborted(ScrapeFailure::Cancelled),
                        Ok(None) => ScrapeState::HaveLastPage(StopReason::Cancelled),
                        Err(e) if pages.is_empty() => {
                            warn!("First page for '{}' failed: {}", query, e);
                            ScrapeState::Aborted(ScrapeFailure::RemoteUnreachable(e))
                        }
                        Err(e) => {
                            warn!(
                                "Page {} for '{}' failed, keeping {} pages: {}",
                                page_number,
                                query,
                                pages.len(),
                                e
                            );
                            ScrapeState::HaveLastPage(StopReason::PageFailed)
                        }
                    }
                }
                ScrapeState::HaveLastPage(reason) => {
                    if pages.iter().all(|page| page.word_count() == 0) {
                        ScrapeState::Aborted(ScrapeFailure::NoResultsFound {
                            query: query.to_string(),
                        })
                    } else {
                        ScrapeState::Done(reason)
                    }
                }
                ScrapeState::Aborted(failure) => return Err(failure),
                ScrapeState::Done(reason) => break reason,
            };
        };

        info!(
            "Scraped {} pages for '{}' in {}ms (stop: {:?})",
            pages.len(),
            query,
            started.elapsed().as_millis(),
            stop_reason
        );

        Ok(ScrapeSession {
            query: query.to_string(),
            pages,
            stop_reason,
        })
    }

    /// Decide whether to fetch the page after `page`
    ///
    /// `pages_fetched` counts `page` itself.
    pub fn continuation(&self, page: &PageResult, pages_fetched: usize) -> Continuation {
        if !page.pagination.has_next_page() {
            return Continuation::Stop(StopReason::LastPage);
        }
        if !page.has_relevant_words() {
            return Continuation::Stop(StopReason::OnlyTangentialResults);
        }
        if pages_fetched as u64 > u64::from(self.max_additional_pages) {
            return Continuation::Stop(StopReason::PageCapReached);
        }
        page.page_number
            .checked_add(1)
            .map_or(Continuation::Stop(StopReason::LastPage), Continuation::Fetch)
    }

    /// Turn a parsed document into a page result
    ///
    /// Results lists are tagged with the kind of the most recent header;
    /// lists before any header are `Unknown`.
    pub fn assemble_page(
        &self,
        view: &DocumentView,
        page_number: u32,
        query: &str,
        source_url: &str,
    ) -> PageResult {
        let mut sections = Vec::new();
        let mut pagination = PaginationState::default();
        let mut current_kind = SectionKind::Unknown;

        for fragment in view.fragments() {
            if fragment.has_class("page-header") {
                current_kind = self.classifier.classify_header(fragment);
            } else if fragment.has_classes(&["list-group", "results"]) {
                sections.push(extract_section(fragment, current_kind, query, source_url));
            } else if fragment.has_class("pagination") {
                pagination = extract_pagination(fragment);
            }
        }

        PageResult {
            page_number,
            sections,
            pagination,
        }
    }

    /// Fetch and assemble one page; `Ok(None)` when cancelled
    async fn fetch_page(
        &self,
        query: &str,
        page_number: u32,
        cancel: &CancellationToken,
    ) -> Result<Option<PageResult>, PageError> {
        if cancel.is_cancelled() {
            debug!("Search for '{}' cancelled before page {}", query, page_number);
            return Ok(None);
        }

        let raw = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Search for '{}' cancelled while fetching page {}", query, page_number);
                return Ok(None);
            }
            result = self.fetcher.fetch(query, page_number) => result?,
        };

        let view = document::parse(&raw.markup)?;
        Ok(Some(self.assemble_page(&view, page_number, query, &raw.url)))
    }
}
