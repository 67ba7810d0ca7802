// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Orchestrator tests against a scripted remote site

use crate::common::{
    main_page, EntryFixture, PageFixture, ScriptedFetcher, MAIN_HEADER, OTHERS_HEADER,
};
use fabstir_dictionary_node::scrape::{
    FetchError, PageError, PageFetcher, ParseError, RawPage, ScrapeFailure, ScrapeOrchestrator,
    ScrapeSession, SectionKind, StopReason,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn others_only_page(active: u32, total: u32) -> PageFixture {
    PageFixture::new()
        .section(
            OTHERS_HEADER,
            &[EntryFixture::slovene("preizkus", &["test"], "SSKJ")],
        )
        .pagination(active, total)
}

async fn run(
    fetcher: &Arc<ScriptedFetcher>,
    cap: u32,
    start_page: u32,
) -> Result<ScrapeSession, ScrapeFailure> {
    let orchestrator =
        ScrapeOrchestrator::new(fetcher.clone()).with_max_additional_pages(cap);
    orchestrator
        .search("test", start_page, &CancellationToken::new())
        .await
}

#[tokio::test]
async fn test_single_page_scenario() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, main_page(1, 1)));
    let session = run(&fetcher, 3, 1).await.unwrap();

    assert_eq!(fetcher.calls(), vec![1]);
    assert_eq!(session.query, "test");
    assert_eq!(session.pages.len(), 1);
    assert_eq!(session.stop_reason, StopReason::LastPage);

    let section = &session.pages[0].sections[0];
    assert_eq!(section.kind, SectionKind::Main);
    assert_eq!(section.words[0].surface_form, "test");
    assert_eq!(section.words[0].explanations, vec!["poskusiti"]);

    let pagination = session.last_pagination();
    assert_eq!(
        (pagination.current_page, pagination.total_pages, pagination.page_size),
        (1, 1, 10)
    );
}

#[tokio::test]
async fn test_first_page_failure_is_remote_unreachable() {
    let fetcher = Arc::new(ScriptedFetcher::new().failing(1));
    let result = run(&fetcher, 3, 1).await;

    assert!(matches!(
        result,
        Err(ScrapeFailure::RemoteUnreachable(PageError::Fetch(
            FetchError::HttpStatus { status: 503, .. }
        )))
    ));
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_first_page_parse_failure_is_remote_unreachable() {
    let fetcher = Arc::new(ScriptedFetcher::new().markup(1, b"  \n "));
    let result = run(&fetcher, 3, 1).await;
    assert!(matches!(
        result,
        Err(ScrapeFailure::RemoteUnreachable(PageError::Parse(
            ParseError::EmptyDocument
        )))
    ));
}

#[tokio::test]
async fn test_page_without_results_is_no_results() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, PageFixture::new()));
    let result = run(&fetcher, 3, 1).await;
    assert!(matches!(result, Err(ScrapeFailure::NoResultsFound { .. })));
}

#[tokio::test]
async fn test_later_page_parse_failure_keeps_partial_session() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .page(1, main_page(1, 3))
            .markup(2, &[0xff, 0xfe, 0x00]),
    );
    let session = run(&fetcher, 3, 1).await.unwrap();
    assert_eq!(session.pages.len(), 1);
    assert_eq!(session.stop_reason, StopReason::PageFailed);
}

#[tokio::test]
async fn test_others_only_page_stops() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, others_only_page(1, 3)));
    let session = run(&fetcher, 3, 1).await.unwrap();

    assert_eq!(fetcher.calls(), vec![1]);
    assert_eq!(session.pages.len(), 1);
    assert_eq!(session.stop_reason, StopReason::OnlyTangentialResults);
    // the tangential words are still returned
    assert_eq!(session.words().count(), 1);
}

#[tokio::test]
async fn test_cap_bounds_further_fetches() {
    let mut script = ScriptedFetcher::new();
    for page in 1..=5 {
        script = script.page(page, main_page(page, 5));
    }
    let fetcher = Arc::new(script);

    let session = run(&fetcher, 3, 1).await.unwrap();
    assert_eq!(fetcher.calls(), vec![1, 2, 3, 4]);
    assert_eq!(session.pages.len(), 4);
    assert_eq!(session.stop_reason, StopReason::PageCapReached);
}

#[tokio::test]
async fn test_large_cap_stops_on_last_page() {
    let mut script = ScriptedFetcher::new();
    for page in 1..=5 {
        script = script.page(page, main_page(page, 5));
    }
    let fetcher = Arc::new(script);

    let session = run(&fetcher, 10, 1).await.unwrap();
    assert_eq!(fetcher.calls(), vec![1, 2, 3, 4, 5]);
    assert_eq!(session.stop_reason, StopReason::LastPage);
}

#[tokio::test]
async fn test_each_page_gates_its_successor() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .page(1, main_page(1, 5))
            .page(2, others_only_page(2, 5)),
    );
    let session = run(&fetcher, 3, 1).await.unwrap();

    assert_eq!(fetcher.calls(), vec![1, 2]);
    assert_eq!(session.stop_reason, StopReason::OnlyTangentialResults);
}

#[tokio::test]
async fn test_later_page_failure_keeps_partial_session() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .page(1, main_page(1, 4))
            .page(2, main_page(2, 4))
            .failing(3),
    );
    let session = run(&fetcher, 3, 1).await.unwrap();

    assert_eq!(fetcher.calls(), vec![1, 2, 3]);
    assert_eq!(session.pages.len(), 2);
    assert_eq!(session.stop_reason, StopReason::PageFailed);
    assert!(session.stop_reason.is_truncated());
}

#[tokio::test]
async fn test_zero_words_everywhere_is_no_results() {
    let empty_main = PageFixture::new()
        .section(MAIN_HEADER, &[])
        .pagination(1, 1);
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, empty_main));
    let result = run(&fetcher, 3, 1).await;

    match result {
        Err(ScrapeFailure::NoResultsFound { query }) => assert_eq!(query, "test"),
        other => panic!("expected NoResultsFound, got {:?}", other.map(|s| s.pages.len())),
    }
}

#[tokio::test]
async fn test_start_page_is_respected() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .page(3, main_page(3, 4))
            .page(4, main_page(4, 4)),
    );
    let session = run(&fetcher, 3, 3).await.unwrap();

    assert_eq!(fetcher.calls(), vec![3, 4]);
    assert_eq!(session.pages[0].page_number, 3);
    assert_eq!(session.last_pagination().current_page, 4);
}

#[tokio::test]
async fn test_largest_start_page_does_not_overflow() {
    // the site answers an out-of-range page with its first page
    let fetcher = Arc::new(ScriptedFetcher::new().page(u32::MAX, main_page(1, 5)));
    let session = run(&fetcher, 3, u32::MAX).await.unwrap();

    assert_eq!(fetcher.calls(), vec![u32::MAX]);
    assert_eq!(session.pages.len(), 1);
    assert_eq!(session.stop_reason, StopReason::LastPage);
}

#[tokio::test]
async fn test_start_page_zero_means_first_page() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, main_page(1, 1)));
    run(&fetcher, 3, 0).await.unwrap();
    assert_eq!(fetcher.calls(), vec![1]);
}

#[tokio::test]
async fn test_cancellation_between_pages_returns_partial_session() {
    let cancel = CancellationToken::new();
    let fetcher = Arc::new(CancellingFetcher {
        inner: ScriptedFetcher::new()
            .page(1, main_page(1, 5))
            .page(2, main_page(2, 5)),
        cancel: cancel.clone(),
    });
    let orchestrator = ScrapeOrchestrator::new(fetcher.clone());
    let session = orchestrator.search("test", 1, &cancel).await.unwrap();

    assert_eq!(fetcher.inner.calls(), vec![1]);
    assert_eq!(session.pages.len(), 1);
    assert_eq!(session.stop_reason, StopReason::Cancelled);
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let fetcher = Arc::new(ScriptedFetcher::new().page(1, main_page(1, 1)));
    let orchestrator = Arc::new(ScrapeOrchestrator::new(fetcher.clone()));

    let cancel = CancellationToken::new();
    let (a, b) = tokio::join!(
        orchestrator.search("test", 1, &cancel),
        orchestrator.search("preizkus", 1, &cancel)
    );

    assert_eq!(a.unwrap().query, "test");
    let b = b.unwrap();
    assert_eq!(b.query, "preizkus");
    // Main surface forms follow each session's own query
    assert_eq!(b.pages[0].sections[0].words[0].surface_form, "preizkus");
    assert_eq!(fetcher.calls().len(), 2);
}

/// Cancels the search token after serving the first page
struct CancellingFetcher {
    inner: ScriptedFetcher,
    cancel: CancellationToken,
}

#[async_trait::async_trait]
impl PageFetcher for CancellingFetcher {
    async fn fetch(&self, query: &str, page: u32) -> Result<RawPage, FetchError> {
        let result = self.inner.fetch(query, page).await;
        self.cancel.cancel();
        result
    }

    fn name(&self) -> &'static str {
        "cancelling"
    }
}
