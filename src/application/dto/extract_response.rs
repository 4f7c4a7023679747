// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use uuid::Uuid;

/// 提取请求受理响应DTO
#[derive(Debug, Serialize)]
pub struct ExtractResponseDto {
    /// 是否受理成功
    pub success: bool,
    /// 任务ID
    pub id: Uuid,
    /// 受理的原始URL
    pub url: String,
    /// 提示信息
    pub message: String,
}
