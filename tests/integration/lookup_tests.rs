//! Integration tests for the search/enrich pipeline
//!
//! These tests use wiremock as the catalog site and drive the provider
//! end-to-end.

mod common;

use audioteka_provider::{FullRecord, Provider};
use common::{html, mount_detail, mount_search, test_config, Entry, SEARCH_PATH};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_returns_candidates_in_page_order() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Diuna",
        &[
            Entry {
                id: Some("d1"),
                ..Entry::new("Diuna", "/pl/audiobook/diuna")
            },
            Entry::new("Mesjasz Diuny", "/pl/audiobook/mesjasz-diuny"),
        ],
    )
    .await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let candidates = provider.search("Diuna", None).await;

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id, "d1");
    assert_eq!(candidates[0].title, "Diuna");
    assert_eq!(
        candidates[0].url,
        format!("{}/pl/audiobook/diuna", server.uri())
    );
    assert_eq!(candidates[1].id, "mesjasz-diuny");
    assert_eq!(candidates[1].authors, vec!["Frank Herbert".to_string()]);
    assert_eq!(candidates[1].rating, Some(4.5));
    assert_eq!(candidates[1].source.id, "audioteka");
}

#[tokio::test]
async fn test_search_upstream_error_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = Provider::new(&test_config(&server)).unwrap();

    assert!(provider.search("Diuna", None).await.is_empty());
    assert!(provider.lookup("Diuna", None).await.is_empty());
}

#[tokio::test]
async fn test_search_without_entries_returns_empty() {
    let server = MockServer::start().await;
    mount_search(&server, "zzzz", &[]).await;

    let provider = Provider::new(&test_config(&server)).unwrap();

    assert!(provider.search("zzzz", None).await.is_empty());
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Diuna",
        &[
            Entry::new("Diuna", "/pl/audiobook/diuna"),
            Entry::new("Dzieci Diuny", "/pl/audiobook/dzieci-diuny"),
        ],
    )
    .await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let first = provider.search("Diuna", Some("Herbert")).await;
    let second = provider.search("Diuna", Some("Herbert")).await;

    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_author_is_not_sent_to_catalog() {
    let server = MockServer::start().await;
    mount_search(&server, "Diuna", &[]).await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    provider.search("Diuna", Some("Frank Herbert")).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let pairs: Vec<(String, String)> = requests[0].url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("query".to_string(), "Diuna".to_string())]);
}

#[tokio::test]
async fn test_incomplete_entries_are_skipped() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Diuna",
        &[
            Entry::new("Diuna", "/pl/audiobook/diuna"),
            Entry {
                href: None,
                ..Entry::new("Bez linku", "/unused")
            },
            Entry {
                author: "",
                ..Entry::new("Bez autora", "/pl/audiobook/bez-autora")
            },
            Entry::new("", "/pl/audiobook/bez-tytulu"),
            Entry::new("Heretycy Diuny", "/pl/audiobook/heretycy"),
        ],
    )
    .await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let titles: Vec<String> = provider
        .search("Diuna", None)
        .await
        .into_iter()
        .map(|c| c.title)
        .collect();

    assert_eq!(titles, vec!["Diuna".to_string(), "Heretycy Diuny".to_string()]);
}

#[tokio::test]
async fn test_enrich_merges_detail_fields() {
    let server = MockServer::start().await;
    mount_search(&server, "Diuna", &[Entry::new("Diuna", "/pl/audiobook/diuna")]).await;
    mount_detail(&server, "/pl/audiobook/diuna", "Andrzej Ferenc", None).await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let records = provider.lookup("Diuna", None).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.title, "Diuna");
    assert_eq!(record.narrator.as_deref(), Some("Andrzej Ferenc"));
    assert_eq!(record.duration.as_deref(), Some("10 godz. 5 min"));
    assert_eq!(record.publisher.as_deref(), Some("Rebis"));
    assert_eq!(record.kind.as_deref(), Some("Audiobook"));
    assert_eq!(record.genres, Some(vec!["Fantastyka".to_string()]));
    assert_eq!(record.series.as_deref(), Some("Kroniki Diuny"));
    assert_eq!(record.cover.as_deref(), Some("https://img.test/large.jpg"));
    assert_eq!(record.rating, Some(4.9));
    assert_eq!(record.languages, Some(vec!["pol".to_string()]));
    assert_eq!(
        record
            .identifiers
            .as_ref()
            .and_then(|ids| ids.get("audioteka"))
            .map(String::as_str),
        Some("diuna")
    );
}

#[tokio::test]
async fn test_failed_detail_fetch_returns_candidate_unchanged() {
    let server = MockServer::start().await;
    mount_search(&server, "Diuna", &[Entry::new("Diuna", "/pl/audiobook/diuna")]).await;
    Mock::given(method("GET"))
        .and(path("/pl/audiobook/diuna"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let candidate = provider.search("Diuna", None).await.remove(0);
    let record = provider.enrich(candidate.clone()).await;

    assert_eq!(record, FullRecord::from(candidate));
    assert!(!record.is_enriched());
}

#[tokio::test]
async fn test_empty_detail_body_returns_candidate_unchanged() {
    let server = MockServer::start().await;
    mount_search(&server, "Diuna", &[Entry::new("Diuna", "/pl/audiobook/diuna")]).await;
    Mock::given(method("GET"))
        .and(path("/pl/audiobook/diuna"))
        .respond_with(html(String::new()))
        .mount(&server)
        .await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let candidate = provider.search("Diuna", None).await.remove(0);
    let record = provider.enrich(candidate.clone()).await;

    assert_eq!(record, FullRecord::from(candidate));
}

#[tokio::test]
async fn test_detail_timeout_returns_candidate_unchanged() {
    let server = MockServer::start().await;
    mount_search(&server, "Diuna", &[Entry::new("Diuna", "/pl/audiobook/diuna")]).await;
    mount_detail(
        &server,
        "/pl/audiobook/diuna",
        "Andrzej Ferenc",
        Some(Duration::from_secs(5)),
    )
    .await;

    let mut config = test_config(&server);
    config.http.request_timeout_secs = Some(1);
    let provider = Provider::new(&config).unwrap();

    let records = provider.lookup("Diuna", None).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Diuna");
    assert_eq!(records[0].narrator, None);
}

#[tokio::test]
async fn test_one_failed_enrichment_does_not_fail_the_batch() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "Diuna",
        &[
            Entry::new("Diuna", "/pl/audiobook/diuna"),
            Entry::new("Mesjasz Diuny", "/pl/audiobook/mesjasz-diuny"),
            Entry::new("Dzieci Diuny", "/pl/audiobook/dzieci-diuny"),
        ],
    )
    .await;
    mount_detail(&server, "/pl/audiobook/diuna", "Narrator 1", None).await;
    // No mock for mesjasz-diuny: wiremock answers 404
    mount_detail(&server, "/pl/audiobook/dzieci-diuny", "Narrator 3", None).await;

    let provider = Provider::new(&test_config(&server)).unwrap();
    let records = provider.lookup("Diuna", None).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].narrator.as_deref(), Some("Narrator 1"));
    assert_eq!(records[1].title, "Mesjasz Diuny");
    assert_eq!(records[1].narrator, None);
    assert_eq!(records[1].duration, None);
    assert_eq!(
        records[1].cover.as_deref(),
        Some("https://img.test/x-small.jpg")
    );
    assert_eq!(records[2].narrator.as_deref(), Some("Narrator 3"));
}

#[tokio::test]
async fn test_lookup_preserves_order_despite_latency() {
    let server = MockServer::start().await;

    let titles = ["Tom 1", "Tom 2", "Tom 3", "Tom 4", "Tom 5"];
    let paths: Vec<String> = (1..=titles.len())
        .map(|i| format!("/pl/audiobook/tom-{}", i))
        .collect();
    let entries: Vec<Entry<'_>> = titles
        .iter()
        .zip(&paths)
        .map(|(title, path)| Entry::new(title, path))
        .collect();
    mount_search(&server, "Tom", &entries).await;

    // Earlier candidates answer later
    let delays_ms = [400u64, 50, 300, 0, 150];
    for (i, path) in paths.iter().enumerate() {
        mount_detail(
            &server,
            path,
            &format!("Narrator {}", i + 1),
            Some(Duration::from_millis(delays_ms[i])),
        )
        .await;
    }

    let provider = Provider::new(&test_config(&server)).unwrap();
    let records = provider.lookup("Tom", None).await;

    let got_titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(got_titles, titles.to_vec());

    let narrators: Vec<Option<&str>> = records.iter().map(|r| r.narrator.as_deref()).collect();
    assert_eq!(
        narrators,
        vec![
            Some("Narrator 1"),
            Some("Narrator 2"),
            Some("Narrator 3"),
            Some("Narrator 4"),
            Some("Narrator 5"),
        ]
    );
}

#[tokio::test]
async fn test_bounded_concurrency_enriches_everything() {
    let server = MockServer::start().await;

    let paths: Vec<String> = (1..=4).map(|i| format!("/pl/audiobook/b-{}", i)).collect();
    let titles: Vec<String> = (1..=4).map(|i| format!("Book {}", i)).collect();
    let entries: Vec<Entry<'_>> = titles
        .iter()
        .zip(&paths)
        .map(|(title, path)| Entry::new(title, path))
        .collect();
    mount_search(&server, "Book", &entries).await;
    for path in &paths {
        mount_detail(&server, path, "Lektor", Some(Duration::from_millis(20))).await;
    }

    let mut config = test_config(&server);
    config.http.max_concurrent_enrichments = 1;
    let provider = Provider::new(&config).unwrap();

    let records = provider.lookup("Book", None).await;

    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.is_enriched()));
    let got: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(got, vec!["Book 1", "Book 2", "Book 3", "Book 4"]);
}
