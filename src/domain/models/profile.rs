// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// 企业画像
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BusinessProfile {
    /// 企业名称
    pub name: Option<String>,
    /// 所属行业
    pub industry: Option<String>,
    /// 业务类型 (B2B/B2C/SaaS等)
    pub business_type: Option<String>,
    /// 企业简介
    pub about: Option<String>,
    /// 服务列表
    #[serde(default)]
    pub services: Vec<String>,
    /// 关键词
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// 联系信息
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    /// 邮箱列表
    #[serde(default)]
    pub email: Vec<String>,
    /// 电话列表
    #[serde(default)]
    pub phone: Vec<String>,
    /// 地址
    pub address: Option<String>,
    /// 社交媒体链接（平台名 -> URL）
    #[serde(default)]
    pub social_links: HashMap<String, String>,
}

/// 品牌视觉信息
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Branding {
    /// Logo地址
    pub logo_url: Option<String>,
    /// Favicon地址
    pub favicon_url: Option<String>,
    /// 主色
    pub primary_color: Option<String>,
    /// 配色盘
    #[serde(default)]
    pub color_palette: Vec<String>,
    /// 字体列表
    #[serde(default)]
    pub fonts: Vec<String>,
    /// 布局风格
    pub layout_style: Option<String>,
    /// 按钮样式
    #[serde(default)]
    pub button_style: HashMap<String, serde_json::Value>,
}

/// 原始内容片段
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContentSections {
    /// 首页主标题
    pub homepage_heading: Option<String>,
    /// 未加工的简介文本
    pub about_raw: Option<String>,
    /// 未加工的服务条目
    #[serde(default)]
    pub services_raw: Vec<String>,
}

/// 技术元数据
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TechnicalMetadata {
    /// 是否通过动态渲染抓取
    #[serde(default)]
    pub is_dynamic: bool,
    /// 检测到的前端框架
    pub framework_detected: Option<String>,
    /// 页面标题
    pub page_title: Option<String>,
    /// Meta描述
    pub meta_description: Option<String>,
    /// 规范URL
    pub canonical_url: Option<String>,
}

/// 抓取得到的完整业务记录
///
/// 持久化之前必须通过 `validate()` 校验；校验失败的记录不会入库。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScrapedProfile {
    /// 来源URL（规范化后）
    #[validate(
        url(message = "source_url must be a valid URL"),
        length(max = 2048, message = "source_url is too long")
    )]
    pub source_url: String,

    /// 抓取时间
    pub scraped_at: DateTime<Utc>,

    /// 抓取状态
    #[validate(length(min = 1, message = "crawl_status must not be empty"))]
    pub crawl_status: String,

    /// 置信度评分 (0.0 - 1.0)
    #[validate(range(min = 0.0, max = 1.0, message = "confidence_score out of range"))]
    pub confidence_score: f64,

    #[validate(nested)]
    #[serde(default)]
    pub business_profile: BusinessProfile,

    #[validate(nested)]
    #[serde(default)]
    pub contact: ContactInfo,

    #[validate(nested)]
    #[serde(default)]
    pub branding: Branding,

    #[validate(nested)]
    #[serde(default)]
    pub content_sections: ContentSections,

    #[validate(nested)]
    #[serde(default)]
    pub technical_metadata: TechnicalMetadata,
}

impl ScrapedProfile {
    /// 以给定来源URL创建一条空白记录
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            scraped_at: Utc::now(),
            crawl_status: "pending".to_string(),
            confidence_score: 0.0,
            business_profile: BusinessProfile::default(),
            contact: ContactInfo::default(),
            branding: Branding::default(),
            content_sections: ContentSections::default(),
            technical_metadata: TechnicalMetadata::default(),
        }
    }
}
