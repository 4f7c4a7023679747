// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 规范化URL
///
/// 缺少协议时补全 `https://`，并去除末尾斜杠。
/// 纯函数且幂等：`normalize_url(normalize_url(x)) == normalize_url(x)`
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// 检查URL是否结构完整
///
/// 仅当URL同时具有协议和主机名时返回true
pub fn is_well_formed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.host_str().is_some(),
        Err(_) => false,
    }
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 基于页面基准URL解析出绝对URL字符串
///
/// 解析失败时返回None（例如 `data:` 伪链接）
pub fn absolutize(base_url: &str, path: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    resolve_url(&base, path).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_prepends_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_url("https://example.com/"), "https://example.com");
        assert_eq!(
            normalize_url("https://example.com/path/"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["example.com", "https://example.com//", "  a.io/x/ "] {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once);
        }
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("https://example.com"));
        assert!(is_well_formed("http://example.com/path?q=1"));
        assert!(!is_well_formed("https://"));
        assert!(!is_well_formed("not a url"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_resolve_absolute_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(
            resolve_url(&base, "http://t.co/c").unwrap().as_str(),
            "http://t.co/c"
        );
    }

    #[test]
    fn test_resolve_root_relative_url() {
        let base = Url::parse("http://example.com/a/b").unwrap();
        assert_eq!(
            resolve_url(&base, "/c").unwrap().as_str(),
            "http://example.com/c"
        );
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://example.com/page", "/logo.png").as_deref(),
            Some("https://example.com/logo.png")
        );
        assert_eq!(absolutize("not a base", "/logo.png"), None);
    }
}
