// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use extractrs::utils::robots::{RobotsChecker, RobotsCheckerTrait};

const UA: &str = "extractrs-test/1.0";

fn checker() -> RobotsChecker {
    RobotsChecker::new(Duration::from_secs(2))
}

#[tokio::test]
async fn test_unreachable_robots_fails_open() {
    // Nothing listens on port 1, the fetch fails immediately
    let allowed = checker().is_allowed("http://127.0.0.1:1/page", UA).await;
    assert!(allowed);
}

#[tokio::test]
async fn test_server_error_on_robots_fails_open() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/page", server.uri());
    assert!(checker().is_allowed(&url, UA).await);
}

#[tokio::test]
async fn test_explicit_disallow_is_enforced() {
    let server = MockServer::start().await;
    let robots_body = "User-agent: *\nDisallow: /private/\n";
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(robots_body))
        .mount(&server)
        .await;

    let checker = checker();
    let blocked = format!("{}/private/data", server.uri());
    let open = format!("{}/public", server.uri());

    assert!(!checker.is_allowed(&blocked, UA).await);
    assert!(checker.is_allowed(&open, UA).await);
}

#[tokio::test]
async fn test_agent_specific_disallow_is_enforced() {
    let server = MockServer::start().await;
    let robots_body = format!("User-agent: {}\nDisallow: /\n", UA);
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(robots_body))
        .mount(&server)
        .await;

    let url = format!("{}/anything", server.uri());
    assert!(!checker().is_allowed(&url, UA).await);
}

#[tokio::test]
async fn test_robots_response_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /\n"))
        .expect(1)
        .mount(&server)
        .await;

    let checker = checker();
    let url = format!("{}/page", server.uri());
    assert!(checker.is_allowed(&url, UA).await);
    assert!(checker.is_allowed(&url, UA).await);
}
