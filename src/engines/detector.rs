// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 检测页面是否依赖客户端框架渲染
///
/// 基于固定的特征签名（Next.js、React、Vue）做启发式判断。
/// 命中签名只表示值得升级到动态抓取，并不保证页面必须执行JS。
pub fn detect_framework_rendering(html: &str) -> bool {
    detected_framework(html).is_some()
}

/// 识别命中的客户端框架
///
/// # 返回值
///
/// 命中签名时返回框架名称，否则返回None
pub fn detected_framework(html: &str) -> Option<&'static str> {
    if html.contains(r#"id="__next""#) {
        return Some("nextjs");
    }
    if html.contains("data-reactroot") {
        return Some("react");
    }
    if html.contains(r#"id="app""#) && html.to_lowercase().contains("vue") {
        return Some("vue");
    }
    None
}
