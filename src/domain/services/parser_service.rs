// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use ego_tree::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, Html, Selector};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::utils::url_utils::absolutize;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").expect("invalid email regex"));

/// 社交平台识别关键词
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("facebook.com", "facebook"),
    ("twitter.com", "twitter"),
    ("x.com", "twitter"),
    ("instagram.com", "instagram"),
    ("linkedin.com", "linkedin"),
    ("youtube.com", "youtube"),
    ("tiktok.com", "tiktok"),
];

/// 解析后的页面结构化字段
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub page_title: Option<String>,
    pub meta_description: Option<String>,
    pub og_title: Option<String>,
    pub h1: Option<String>,
    /// 可见文本的前1000个字符
    pub about_snippet: Option<String>,
    /// 全部可见文本，供后续智能分析使用
    pub visible_text: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    /// 页面上出现的绝对链接
    pub links: Vec<String>,
    pub logo_url: Option<String>,
    pub favicon_url: Option<String>,
    pub canonical_url: Option<String>,
    pub social_links: HashMap<String, String>,
}

/// HTML解析服务
///
/// 从抓取到的页面中提取标题、联系方式、Logo等结构化字段。
/// 所有解析都是尽力而为：缺失的字段保持为空，不产生错误。
pub struct ParserService;

impl ParserService {
    pub fn new() -> Self {
        Self
    }

    /// 解析页面HTML
    ///
    /// # 参数
    ///
    /// * `html` - 页面原始HTML
    /// * `base_url` - 用于将相对链接转换为绝对链接的基准URL
    pub fn parse(&self, html: &str, base_url: &str) -> ParsedPage {
        debug!(base_url = %base_url, "parsing HTML content");
        let document = Html::parse_document(html);

        let visible_text = collect_visible_text(&document);
        let about_snippet = if visible_text.is_empty() {
            None
        } else {
            Some(visible_text.chars().take(1000).collect())
        };

        let mut page = ParsedPage {
            page_title: select_text(&document, "title"),
            meta_description: meta_content(&document, r#"meta[name="description"]"#)
                .or_else(|| meta_content(&document, r#"meta[property="og:description"]"#)),
            og_title: meta_content(&document, r#"meta[property="og:title"]"#),
            h1: select_text(&document, "h1"),
            about_snippet,
            visible_text,
            canonical_url: attr_of(&document, r#"link[rel="canonical"]"#, "href"),
            ..Default::default()
        };

        if let Some(logo) = find_logo(&document) {
            page.logo_url = absolutize(base_url, &logo);
        }
        if let Some(favicon) = attr_of(&document, r#"link[rel~="icon"]"#, "href") {
            page.favicon_url = absolutize(base_url, &favicon);
        }

        let (emails, phones, links, social_links) = collect_contacts(&document, &page.visible_text);
        page.emails = emails;
        page.phones = phones;
        page.links = links;
        page.social_links = social_links;

        page
    }
}

impl Default for ParserService {
    fn default() -> Self {
        Self::new()
    }
}

/// 遍历DOM收集可见文本，跳过脚本和样式节点
fn collect_visible_text(document: &Html) -> String {
    let mut out = String::new();
    collect_text_rec(document.tree.root(), &mut out);
    out.trim().to_string()
}

fn collect_text_rec(node: NodeRef<Node>, out: &mut String) {
    if let Some(el) = node.value().as_element() {
        let name = el.name();
        if name == "script" || name == "style" || name == "noscript" {
            return;
        }
    }
    if let Some(text) = node.value().as_text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(trimmed);
        }
    }
    for child in node.children() {
        collect_text_rec(child, out);
    }
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let el = document.select(&sel).next()?;
    let text: String = el.text().collect::<Vec<_>>().join(" ");
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn attr_of(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    attr_of(document, selector, "content")
}

/// 多策略Logo提取
///
/// 依次尝试：OpenGraph标签、Schema.org JSON-LD、常见的logo类名、
/// alt文本匹配，最后回退到页头/导航栏中的第一张图片。
fn find_logo(document: &Html) -> Option<String> {
    // Strategy 1: OpenGraph logo/image that looks like a logo
    let meta_logo = meta_content(document, r#"meta[property="og:logo"]"#)
        .or_else(|| meta_content(document, r#"meta[property="og:image"]"#));
    if let Some(url) = meta_logo {
        let lower = url.to_lowercase();
        if lower.contains("logo") || lower.contains("brand") {
            return Some(url);
        }
    }

    // Strategy 2: Schema.org JSON-LD
    if let Ok(sel) = Selector::parse(r#"script[type="application/ld+json"]"#) {
        for script in document.select(&sel) {
            let body: String = script.text().collect();
            if let Ok(schema) = serde_json::from_str::<serde_json::Value>(&body) {
                match schema.get("logo") {
                    Some(serde_json::Value::String(url)) => return Some(url.clone()),
                    Some(serde_json::Value::Object(obj)) => {
                        if let Some(serde_json::Value::String(url)) = obj.get("url") {
                            return Some(url.clone());
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    // Strategy 3: common logo class/id names
    for cls in ["logo", "brand", "header-logo", "navbar-brand", "site-logo"] {
        let selector = format!(r#"img[class*="{0}" i], img[id*="{0}" i]"#, cls);
        if let Some(src) = attr_of(document, &selector, "src") {
            return Some(src);
        }
    }

    // Strategy 4: alt text mentioning "logo"
    if let Some(src) = attr_of(document, r#"img[alt*="logo" i]"#, "src") {
        return Some(src);
    }

    // Strategy 5: first image inside a header or nav
    attr_of(document, "header img, nav img", "src")
}

/// 从链接与正文中提取邮箱、电话、绝对链接和社交媒体链接
fn collect_contacts(
    document: &Html,
    visible_text: &str,
) -> (Vec<String>, Vec<String>, Vec<String>, HashMap<String, String>) {
    let mut emails = BTreeSet::new();
    let mut phones = BTreeSet::new();
    let mut links = BTreeSet::new();
    let mut social_links: HashMap<String, String> = HashMap::new();

    if let Ok(sel) = Selector::parse("a[href]") {
        for link in document.select(&sel) {
            let href = match link.value().attr("href") {
                Some(h) => h.replace(' ', ""),
                None => continue,
            };

            if let Some(email) = href.strip_prefix("mailto:") {
                let email = email.split('?').next().unwrap_or(email);
                if !email.is_empty() {
                    emails.insert(email.to_string());
                }
            } else if let Some(phone) = href.strip_prefix("tel:") {
                if !phone.is_empty() {
                    phones.insert(phone.to_string());
                }
            } else if href.starts_with("http://") || href.starts_with("https://") {
                links.insert(href.clone());
                let lower = href.to_lowercase();
                for (domain, platform) in SOCIAL_PLATFORMS {
                    if lower.contains(domain) {
                        social_links
                            .entry(platform.to_string())
                            .or_insert_with(|| href.clone());
                        break;
                    }
                }
            }
        }
    }

    for m in EMAIL_RE.find_iter(visible_text) {
        emails.insert(m.as_str().to_string());
    }

    (
        emails.into_iter().collect(),
        phones.into_iter().collect(),
        links.into_iter().collect(),
        social_links,
    )
}

#[cfg(test)]
#[path = "parser_service_test.rs"]
mod tests;
