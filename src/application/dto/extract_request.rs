// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use validator::Validate;

/// 提取请求DTO
///
/// URL不要求携带协议前缀，流水线内部会做规范化
#[derive(Debug, Deserialize, Validate)]
pub struct ExtractRequestDto {
    /// 目标URL
    #[validate(length(min = 1, max = 2048, message = "url must be between 1 and 2048 characters"))]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_bare_domain() {
        let dto = ExtractRequestDto {
            url: "example.com".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_url() {
        let dto = ExtractRequestDto { url: String::new() };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_rejects_overlong_url() {
        let dto = ExtractRequestDto {
            url: "a".repeat(3000),
        };
        assert!(dto.validate().is_err());
    }
}
