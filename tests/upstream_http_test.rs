//! HTTP index source against a mock upstream.

mod common;

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use industry_index::adapters::upstream::HttpIndexSource;
use industry_index::domain::models::PeriodFilter;
use industry_index::{DomainError, IndexSource, IndexService};

const INDEX_PATH: &str = "/api/v1/index/industries";

fn source_for(server: &MockServer, timeout: Duration) -> HttpIndexSource {
    HttpIndexSource::new(format!("{}{INDEX_PATH}", server.uri()), timeout).unwrap()
}

#[tokio::test]
async fn test_fetch_posts_empty_body_and_parses_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let doc = source_for(&server, Duration::from_secs(5)).fetch().await.unwrap();

    assert_eq!(doc.industries(), ["CPG", "BANKING"]);
    assert_eq!(doc.scores_for("cpg").len(), 4);
    assert_eq!(doc.overviews().len(), 2);
}

#[tokio::test]
async fn test_server_error_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
        .mount(&server)
        .await;

    let err = source_for(&server, Duration::from_secs(5)).fetch().await.unwrap_err();

    match err {
        DomainError::UpstreamUnavailable(message) => {
            assert!(message.contains("500"), "message: {message}");
            assert!(message.contains("database on fire"), "message: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server, Duration::from_secs(5)).fetch().await.unwrap_err();
    assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_non_object_body_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&server)
        .await;

    let err = source_for(&server, Duration::from_secs(5)).fetch().await.unwrap_err();
    assert!(matches!(err, DomainError::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::fixture())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = source_for(&server, Duration::from_millis(200))
        .fetch()
        .await
        .unwrap_err();

    match err {
        DomainError::UpstreamUnavailable(message) => {
            assert!(message.contains("timed out"), "message: {message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_service_fetches_once_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INDEX_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let source = Arc::new(source_for(&server, Duration::from_secs(5)));
    let service = IndexService::with_source(source, Duration::from_secs(600));

    let companies = service
        .industry_companies("cpg", PeriodFilter::any())
        .await
        .unwrap();
    assert_eq!(companies, ["A", "B"]);
    service.available_periods(None).await.unwrap();
    service.list_industries().await.unwrap();

    // `expect(1)` is verified when the server drops.
}
