// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::profile::ScrapedProfile;

/// URL验证结果
///
/// 拒绝时携带人类可读的原因，规范化URL仅在通过时存在。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// 是否通过验证
    pub valid: bool,
    /// 规范化后的URL
    pub normalized_url: Option<String>,
    /// 拒绝原因
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn accepted(normalized_url: impl Into<String>) -> Self {
        Self {
            valid: true,
            normalized_url: Some(normalized_url.into()),
            reason: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            normalized_url: None,
            reason: Some(reason.into()),
        }
    }
}

/// 单次流水线执行的最终结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// 是否成功产出记录
    pub success: bool,
    /// 成功时产出的记录
    pub record: Option<ScrapedProfile>,
    /// 失败时的错误描述
    pub error: Option<String>,
}

impl PipelineResult {
    pub fn completed(record: ScrapedProfile) -> Self {
        Self {
            success: true,
            record: Some(record),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            record: None,
            error: Some(error.into()),
        }
    }
}
