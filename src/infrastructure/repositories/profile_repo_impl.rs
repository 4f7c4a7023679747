// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::models::profile::ScrapedProfile;
use crate::domain::repositories::profile_repository::{ProfileRepository, RepositoryError};

/// 基于SQLite的业务记录仓库
///
/// 整条记录以JSON文档形式存储，规范化URL作为主键。
/// 再次写入同一URL时覆盖旧文档。
pub struct ProfileRepositoryImpl {
    pool: SqlitePool,
}

impl ProfileRepositoryImpl {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn upsert(
        &self,
        normalized_url: &str,
        profile: &ScrapedProfile,
    ) -> Result<(), RepositoryError> {
        let data = serde_json::to_string(profile)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO profiles (source_url, data, scraped_at)
            VALUES (?, ?, ?)
            ON CONFLICT(source_url) DO UPDATE SET
                data = excluded.data,
                scraped_at = excluded.scraped_at
            "#,
        )
        .bind(normalized_url)
        .bind(data)
        .bind(profile.scraped_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_url(
        &self,
        normalized_url: &str,
    ) -> Result<Option<ScrapedProfile>, RepositoryError> {
        let row = sqlx::query("SELECT data FROM profiles WHERE source_url = ?")
            .bind(normalized_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => {
                let data: String = row
                    .try_get("data")
                    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
                let profile = serde_json::from_str(&data)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
                Ok(Some(profile))
            }
            None => Ok(None),
        }
    }
}
