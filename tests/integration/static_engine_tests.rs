// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use extractrs::config::settings::CrawlerSettings;
use extractrs::engines::reqwest_engine::ReqwestEngine;
use extractrs::engines::traits::{FetchEngine, FetchError};

fn fast_settings() -> CrawlerSettings {
    CrawlerSettings {
        courtesy_delay_secs: 0.0,
        request_timeout_secs: 1,
        max_retries: 3,
        user_agent: "extractrs-test/1.0".to_string(),
        robots_timeout_secs: 1,
    }
}

#[tokio::test]
async fn test_fetch_returns_page_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><title>ok</title></html>"),
        )
        .mount(&server)
        .await;

    let engine = ReqwestEngine::new(fast_settings());
    let page = engine.fetch(&server.uri()).await.unwrap();

    assert_eq!(page.status_code, 200);
    assert!(page.html.contains("ok"));
    assert!(page.final_url.starts_with("http://127.0.0.1"));
}

#[tokio::test]
async fn test_http_error_fails_after_exactly_one_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ReqwestEngine::new(fast_settings());
    let err = engine
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::ServerRejected { status: 404 }));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ReqwestEngine::new(fast_settings());
    let err = engine
        .fetch(&format!("{}/broken", server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_timeouts_consume_all_retries_then_exhaust() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .expect(3)
        .mount(&server)
        .await;

    let engine = ReqwestEngine::new(fast_settings());
    let err = engine
        .fetch(&format!("{}/slow", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Exhausted));
}

#[tokio::test]
async fn test_connection_refused_aborts_immediately() {
    // Port 1 is closed, the transport error should not be retried
    let engine = ReqwestEngine::new(fast_settings());
    let err = engine.fetch("http://127.0.0.1:1/").await.unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
