// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::settings::EnrichmentSettings;

/// 智能分析得到的业务洞察
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EnrichmentInsights {
    /// 行业类别
    pub industry: Option<String>,
    /// 业务类型
    pub business_type: Option<String>,
    /// 业务简介
    pub about: Option<String>,
    /// 核心服务
    #[serde(default)]
    pub services: Vec<String>,
    /// SEO关键词
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// 智能富化服务接口
///
/// 将非结构化页面文本转换为结构化业务洞察。
/// 失败由调用方兜底，不会使流水线整体失败。
#[async_trait]
pub trait EnrichmentServiceTrait: Send + Sync {
    async fn analyze(
        &self,
        title: &str,
        description: &str,
        raw_text: &str,
    ) -> Result<EnrichmentInsights>;
}

/// 基于 OpenAI 兼容协议的富化服务
///
/// # 配置
///
/// 通过 `enrichment` 配置节指定API密钥、模型与端点。
/// 未配置API密钥时调用直接返回错误，由流水线降级处理。
pub struct EnrichmentService {
    settings: EnrichmentSettings,
}

impl EnrichmentService {
    pub fn new(settings: EnrichmentSettings) -> Self {
        Self { settings }
    }

    fn build_prompt(title: &str, description: &str, raw_text: &str) -> String {
        let truncated: String = raw_text.chars().take(4000).collect();
        format!(
            "You are an expert business analyst and data structurer. \
            I have scraped a website. Below is the unformatted raw text, page title, \
            and meta description from it.\n\n\
            Target:\n\
            Title: {title}\n\
            Description: {description}\n\n\
            Raw Text chunk (truncated for size):\n\
            {truncated}\n\n\
            Based on this data, extract and generate the following JSON strict structure:\n\
            {{\n\
                \"industry\": \"A high-level industry category (e.g. Technology, Healthcare, E-commerce, Local Services)\",\n\
                \"business_type\": \"A specific type (e.g. B2B SaaS, Dental Clinic, Online Store)\",\n\
                \"about\": \"A clean, well-grammar 2-3 sentence summary of what this business does and who they are.\",\n\
                \"services\": [\"List of exactly 3 to 5 core services they offer, extracted and cleaned from the text.\"],\n\
                \"keywords\": [\"5 to 7 relevant SEO keywords for this business\"]\n\
            }}\n\n\
            Return ONLY valid JSON. Focus on accuracy over making things up."
        )
    }
}

#[async_trait]
impl EnrichmentServiceTrait for EnrichmentService {
    async fn analyze(
        &self,
        title: &str,
        description: &str,
        raw_text: &str,
    ) -> Result<EnrichmentInsights> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("enrichment API key not configured"))?;

        let request_body = json!({
            "model": self.settings.model,
            "messages": [
                {
                    "role": "user",
                    "content": Self::build_prompt(title, description, raw_text)
                }
            ],
            "response_format": {"type": "json_object"},
            "temperature": 0.0
        });

        let client = reqwest::Client::new();
        let url = format!("{}/chat/completions", self.settings.api_base_url);
        let response = client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to enrichment API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Enrichment API returned error: {} - {}",
                status,
                error_text
            ));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse enrichment API response")?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format from enrichment API"))?;

        // Clean up potential markdown code blocks
        let clean_content = content
            .trim()
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .trim_end_matches("```");

        serde_json::from_str::<EnrichmentInsights>(clean_content)
            .context("Failed to parse enrichment JSON content")
    }
}

#[cfg(test)]
#[path = "enrichment_service_test.rs"]
mod tests;
