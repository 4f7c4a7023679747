// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use reqwest::Client;
use robotstxt::DefaultMatcher;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use url::Url;

use async_trait::async_trait;

/// Robots.txt检查器接口
#[async_trait]
pub trait RobotsCheckerTrait: Send + Sync {
    /// 检查URL是否被允许访问
    ///
    /// 无法获取 robots.txt 时视为允许（fail-open）
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool;
}

/// 缓存的Robots.txt内容
#[derive(Clone)]
struct CachedRobots {
    /// 内容（None表示该站点没有可用的robots.txt，默认放行）
    content: Option<String>,

    /// 过期时间
    expires_at: Instant,
}

/// Robots.txt检查器
///
/// 每个主机的规则在内存中缓存一小时，避免重复抓取
#[derive(Clone)]
pub struct RobotsChecker {
    /// HTTP客户端
    client: Client,

    /// 内存缓存
    memory_cache: Arc<Mutex<HashMap<String, CachedRobots>>>,

    /// robots.txt请求超时
    fetch_timeout: Duration,
}

#[async_trait]
impl RobotsCheckerTrait for RobotsChecker {
    async fn is_allowed(&self, url_str: &str, user_agent: &str) -> bool {
        let content = match self.get_robots_content(url_str, user_agent).await {
            Some(content) => content,
            // No rules available: permission cannot be determined, fail open
            None => return true,
        };

        // Both the wildcard agent and our specific identity must permit the URL
        let mut wildcard = DefaultMatcher::default();
        let mut specific = DefaultMatcher::default();
        wildcard.one_agent_allowed_by_robots(&content, "*", url_str)
            && specific.one_agent_allowed_by_robots(&content, user_agent, url_str)
    }
}

impl RobotsChecker {
    /// 创建新的Robots检查器实例
    ///
    /// # 参数
    ///
    /// * `fetch_timeout` - robots.txt 抓取超时时间
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            memory_cache: Arc::new(Mutex::new(HashMap::new())),
            fetch_timeout,
        }
    }

    /// 获取Robots.txt内容（带缓存）
    async fn get_robots_content(&self, url_str: &str, user_agent: &str) -> Option<String> {
        let url = Url::parse(url_str).ok()?;
        let host = url.host_str()?;
        let robots_url = format!("{}://{}/robots.txt", url.scheme(), host);

        // 1. Check memory cache
        {
            let mut cache = self.memory_cache.lock().unwrap();
            if let Some(cached) = cache.get(&robots_url) {
                if cached.expires_at > Instant::now() {
                    return cached.content.clone();
                }
                cache.remove(&robots_url);
            }
        }

        // 2. Fetch robots.txt; any failure defaults to "no rules"
        let content = match self
            .client
            .get(&robots_url)
            .header("User-Agent", user_agent)
            .timeout(self.fetch_timeout)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => match resp.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!(
                        "Failed to read robots.txt body from {}: {}. Defaulting to allowing crawl.",
                        robots_url,
                        e
                    );
                    None
                }
            },
            Ok(resp) => {
                tracing::debug!(
                    "robots.txt not found or inaccessible at {} (status {}). Proceeding.",
                    robots_url,
                    resp.status()
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Error checking robots.txt at {}: {}. Defaulting to allowing crawl.",
                    robots_url,
                    e
                );
                None
            }
        };

        // 3. Update memory cache
        {
            let mut cache = self.memory_cache.lock().unwrap();
            cache.insert(
                robots_url,
                CachedRobots {
                    content: content.clone(),
                    expires_at: Instant::now() + Duration::from_secs(3600), // Cache for 1 hour
                },
            );
        }

        content
    }
}
