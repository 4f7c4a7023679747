// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use image::ImageReader;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Logo下载超时
const LOGO_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// 部分CDN会拒绝无浏览器标识的请求
const LOGO_USER_AGENT: &str = "Mozilla/5.0";
/// 调色盘颜色数量
const PALETTE_SIZE: u8 = 5;

/// 提取到的品牌视觉特征
#[derive(Debug, Default, Clone)]
pub struct BrandingInsights {
    pub primary_color: Option<String>,
    pub color_palette: Vec<String>,
    pub fonts: Vec<String>,
    pub layout_style: Option<String>,
}

static GOOGLE_FONTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"family=([^&:"']+)"#).expect("invalid font family regex"));

static FONT_FAMILY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)font-family:\s*([^;}]+)").expect("invalid font-family regex"));

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("invalid hex regex"));

static THEME_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+name=["']theme-color["'][^>]+content=["']([^"']+)["']"#)
        .expect("invalid theme-color regex")
});

/// 品牌分析服务接口
#[async_trait]
pub trait BrandingServiceTrait: Send + Sync {
    /// 从页面HTML和可选的Logo地址中提取品牌视觉特征
    async fn analyze(&self, html: &str, logo_url: Option<&str>) -> BrandingInsights;
}

/// 品牌分析服务
///
/// 主色和配色盘优先来自Logo位图的颜色量化；Logo缺失或下载、解码失败时
/// 回退到页面CSS启发式（theme-color元标签和出现频率最高的十六进制色值）。
/// 字体来自 Google Fonts 链接和内联 font-family 声明。
pub struct BrandingService;

impl BrandingService {
    pub fn new() -> Self {
        Self
    }

    /// 下载Logo并量化出主色与调色盘
    ///
    /// 任何一步失败都返回 `None`，由调用方回退到CSS启发式。
    async fn logo_colors(logo_url: &str) -> Option<(String, Vec<String>)> {
        let client = reqwest::Client::builder()
            .user_agent(LOGO_USER_AGENT)
            .timeout(LOGO_FETCH_TIMEOUT)
            // Logos on misconfigured hosts are still worth sampling
            .danger_accept_invalid_certs(true)
            .build()
            .ok()?;

        let response = client.get(logo_url).send().await.ok()?;
        if !response.status().is_success() {
            debug!(logo_url = %logo_url, status = %response.status(), "logo fetch rejected");
            return None;
        }
        let bytes = response.bytes().await.ok()?;

        let img = ImageReader::new(Cursor::new(bytes.as_ref()))
            .with_guessed_format()
            .ok()?
            .decode()
            .ok()?;
        let rgba = img.to_rgba8();

        let palette = color_thief::get_palette(
            rgba.as_raw(),
            color_thief::ColorFormat::Rgba,
            1,
            PALETTE_SIZE,
        )
        .ok()?;

        let colors: Vec<String> = palette
            .iter()
            .map(|c| format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b))
            .collect();
        let primary = colors.first().cloned()?;
        debug!(logo_url = %logo_url, primary = %primary, "logo palette extracted");
        Some((primary, colors))
    }

    fn extract_fonts(html: &str) -> Vec<String> {
        let mut fonts: Vec<String> = Vec::new();

        for cap in GOOGLE_FONTS_RE.captures_iter(html) {
            let name = cap[1].replace('+', " ");
            if !fonts.contains(&name) {
                fonts.push(name);
            }
        }

        for cap in FONT_FAMILY_RE.captures_iter(html) {
            if let Some(first) = cap[1].split(',').next() {
                let name = first.trim().trim_matches('\'').trim_matches('"').to_string();
                // Skip CSS junk like variables and overly long values
                if !name.is_empty()
                    && name.len() < 25
                    && !name.contains('{')
                    && !name.starts_with("var(")
                    && !fonts.contains(&name)
                {
                    fonts.push(name);
                }
            }
        }

        fonts.truncate(3);
        fonts
    }

    fn extract_colors(html: &str) -> (Option<String>, Vec<String>) {
        let theme_color = THEME_COLOR_RE
            .captures(html)
            .map(|cap| cap[1].trim().to_lowercase());

        // Rank hex values by frequency of appearance in the document
        let mut counts: HashMap<String, usize> = HashMap::new();
        for m in HEX_COLOR_RE.find_iter(html) {
            *counts.entry(m.as_str().to_lowercase()).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let palette: Vec<String> = ranked.into_iter().take(5).map(|(color, _)| color).collect();
        let primary = theme_color.or_else(|| palette.first().cloned());

        (primary, palette)
    }
}

impl Default for BrandingService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrandingServiceTrait for BrandingService {
    async fn analyze(&self, html: &str, logo_url: Option<&str>) -> BrandingInsights {
        let fonts = Self::extract_fonts(html);

        let logo_derived = match logo_url {
            Some(url) => Self::logo_colors(url).await,
            None => None,
        };
        let (primary_color, color_palette) = match logo_derived {
            Some((primary, palette)) => (Some(primary), palette),
            None => Self::extract_colors(html),
        };

        BrandingInsights {
            primary_color,
            color_palette,
            fonts,
            layout_style: Some("modern-minimal".to_string()),
        }
    }
}

#[cfg(test)]
#[path = "branding_service_test.rs"]
mod tests;
