// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::debug;

use crate::domain::models::pipeline::ValidationResult;
use crate::utils::robots::RobotsCheckerTrait;
use crate::utils::url_utils::{is_well_formed, normalize_url};

/// URL验证服务
///
/// 依次执行规范化、格式检查和 robots.txt 检查。
/// robots.txt 不可达时放行（fail-open）。
pub struct ValidationService {
    robots: Arc<dyn RobotsCheckerTrait>,
    user_agent: String,
}

impl ValidationService {
    pub fn new(robots: Arc<dyn RobotsCheckerTrait>, user_agent: impl Into<String>) -> Self {
        Self {
            robots,
            user_agent: user_agent.into(),
        }
    }

    /// 验证目标URL
    ///
    /// # 返回值
    ///
    /// 通过时携带规范化URL，拒绝时携带原因
    pub async fn validate_target(&self, raw_url: &str) -> ValidationResult {
        let normalized = normalize_url(raw_url);

        if !is_well_formed(&normalized) {
            debug!(url = %raw_url, "rejected: invalid URL format");
            return ValidationResult::rejected("invalid URL format");
        }

        if !self.robots.is_allowed(&normalized, &self.user_agent).await {
            debug!(url = %normalized, "rejected: disallowed by robots.txt");
            return ValidationResult::rejected("blocked by robots.txt");
        }

        ValidationResult::accepted(normalized)
    }
}

#[cfg(test)]
#[path = "validation_service_test.rs"]
mod tests;
