// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::profile::ScrapedProfile;

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

/// 业务记录仓库接口
///
/// 以规范化URL为唯一键，重复抓取同一URL时覆盖旧记录。
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// 插入或覆盖一条记录
    async fn upsert(
        &self,
        normalized_url: &str,
        profile: &ScrapedProfile,
    ) -> Result<(), RepositoryError>;

    /// 按规范化URL查询记录
    async fn find_by_url(
        &self,
        normalized_url: &str,
    ) -> Result<Option<ScrapedProfile>, RepositoryError>;
}
