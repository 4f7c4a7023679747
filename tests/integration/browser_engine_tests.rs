// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use extractrs::config::settings::CrawlerSettings;
use extractrs::engines::browser_engine::BrowserEngine;
use extractrs::engines::traits::FetchEngine;

fn browser_settings() -> CrawlerSettings {
    CrawlerSettings {
        courtesy_delay_secs: 0.0,
        request_timeout_secs: 30,
        max_retries: 1,
        user_agent: "extractrs-test/1.0".to_string(),
        robots_timeout_secs: 1,
    }
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn test_render_captures_late_dom_updates() {
    let server = MockServer::start().await;
    let html = r#"
        <html><head><title>Shell</title></head>
        <body><div id="app"></div>
        <script>
            setTimeout(function () {
                document.getElementById("app").textContent = "hydrated content";
            }, 300);
        </script></body></html>
    "#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(&server)
        .await;

    let engine = BrowserEngine::new(browser_settings());
    let page = engine.fetch(&server.uri()).await.expect("render failed");

    assert_eq!(page.status_code, 200);
    // The mutation fires after the load event, so only the settle wait catches it
    assert!(page.html.contains("hydrated content"));
}
