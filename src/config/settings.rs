// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、数据库、爬虫、工作器和富化服务等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 工作器配置
    pub workers: WorkerSettings,
    /// 富化服务配置
    pub enrichment: EnrichmentSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
}

/// 爬虫配置设置
///
/// 两种抓取引擎共享的重试与限速参数
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlerSettings {
    /// 每次抓取尝试前的礼貌延迟（秒）
    pub courtesy_delay_secs: f64,
    /// 单次请求超时时间（秒）
    pub request_timeout_secs: u64,
    /// 最大重试次数
    pub max_retries: u32,
    /// 客户端身份标识（User-Agent）
    pub user_agent: String,
    /// robots.txt 请求超时时间（秒）
    pub robots_timeout_secs: u64,
}

impl CrawlerSettings {
    /// 礼貌延迟时长
    ///
    /// 配置中的负值或非有限值按零处理
    pub fn courtesy_delay(&self) -> Duration {
        if self.courtesy_delay_secs.is_finite() && self.courtesy_delay_secs > 0.0 {
            Duration::from_secs_f64(self.courtesy_delay_secs)
        } else {
            Duration::ZERO
        }
    }

    /// 请求超时时长
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// robots.txt 请求超时时长
    pub fn robots_timeout(&self) -> Duration {
        Duration::from_secs(self.robots_timeout_secs)
    }
}

/// 工作器配置设置
#[derive(Debug, Deserialize)]
pub struct WorkerSettings {
    /// 工作器数量
    pub count: usize,
    /// 任务队列容量
    pub queue_capacity: usize,
}

/// 富化服务配置设置
///
/// 指向任意兼容 OpenAI chat-completions 协议的端点
#[derive(Debug, Deserialize, Clone)]
pub struct EnrichmentSettings {
    /// API密钥（未配置时富化步骤被跳过）
    pub api_key: Option<String>,
    /// 使用的模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default database settings
            .set_default("database.url", "sqlite://extractrs.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            // Default crawler settings
            .set_default("crawler.courtesy_delay_secs", 1.5)?
            .set_default("crawler.request_timeout_secs", 15)?
            .set_default("crawler.max_retries", 3)?
            .set_default(
                "crawler.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
            )?
            .set_default("crawler.robots_timeout_secs", 5)?
            // Default worker settings
            .set_default("workers.count", 4)?
            .set_default("workers.queue_capacity", 256)?
            // Default enrichment settings
            .set_default("enrichment.model", "llama-3.3-70b-versatile")?
            .set_default("enrichment.api_base_url", "https://api.groq.com/openai/v1")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("EXTRACTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
