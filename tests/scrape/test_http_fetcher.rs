// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! HTTP fetcher tests against a local mock of the dictionary site

use crate::common::{main_page, EntryFixture, PageFixture, MAIN_HEADER};
use fabstir_dictionary_node::scrape::{
    FetchError, HttpPageFetcher, PageError, PageFetcher, ScrapeConfig, ScrapeFailure,
    ScrapeOrchestrator, StopReason,
};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ScrapeConfig {
    ScrapeConfig {
        base_url: server.uri(),
        timeout_per_page_secs: 1,
        rate_limit_per_minute: 600,
        ..ScrapeConfig::default()
    }
}

fn html(fixture: &PageFixture) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(fixture.render())
}

#[tokio::test]
async fn test_fetch_sends_search_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/iskanje"))
        .and(query_param("ld", "58"))
        .and(query_param("query", "računalnik"))
        .and(query_param("page", "2"))
        .and(query_param("SearchIn", "Linked"))
        .respond_with(html(&main_page(2, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(config_for(&server)).unwrap();
    let raw = fetcher.fetch("računalnik", 2).await.unwrap();

    assert_eq!(raw.query, "računalnik");
    assert_eq!(raw.page_number, 2);
    assert!(raw.url.starts_with(&server.uri()));
    assert!(raw.url.contains("query=ra%C4%8Dunalnik"));
    assert!(!raw.markup.is_empty());
}

#[tokio::test]
async fn test_fetch_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(config_for(&server)).unwrap();
    let result = fetcher.fetch("test", 1).await;
    assert!(matches!(result, Err(FetchError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn test_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(&main_page(1, 1)).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(config_for(&server)).unwrap();
    let result = fetcher.fetch("test", 1).await;
    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}

#[tokio::test]
async fn test_fetch_rejects_page_zero_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(&main_page(1, 1)))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::new(config_for(&server)).unwrap();
    let result = fetcher.fetch("test", 0).await;
    assert!(matches!(result, Err(FetchError::InvalidPage { page: 0 })));
}

#[tokio::test]
async fn test_search_over_http() {
    let server = MockServer::start().await;
    let page_one = PageFixture::new()
        .section(
            MAIN_HEADER,
            &[
                EntryFixture::slovene("test", &["poskusiti"], "SSKJ"),
                EntryFixture::slovene("tést", &["preizkus"], "Pravopis"),
            ],
        )
        .pagination(1, 2);
    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(html(&page_one))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(html(&main_page(2, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetcher = Arc::new(HttpPageFetcher::new(config.clone()).unwrap());
    let orchestrator = ScrapeOrchestrator::from_config(fetcher, &config);
    let session = orchestrator
        .search("test", 1, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(session.pages.len(), 2);
    assert_eq!(session.stop_reason, StopReason::LastPage);

    let first = &session.pages[0].sections[0].words;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].explanations, vec!["poskusiti", "preizkus"]);
    assert!(first[0].source_url.contains("page=1"));
    assert!(session.pages[1].sections[0].words[0]
        .source_url
        .contains("page=2"));
}

#[tokio::test]
async fn test_unreachable_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetcher = Arc::new(HttpPageFetcher::new(config.clone()).unwrap());
    let orchestrator = ScrapeOrchestrator::from_config(fetcher, &config);
    let result = orchestrator
        .search("test", 1, &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(ScrapeFailure::RemoteUnreachable(PageError::Fetch(
            FetchError::HttpStatus { status: 503, .. }
        )))
    ));
}
