// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::settings::DatabaseSettings;

/// 建立数据库连接池并初始化表结构
///
/// # 参数
///
/// * `settings` - 数据库配置
///
/// # 返回值
///
/// * `Ok(SqlitePool)` - 可用的连接池
/// * `Err(sqlx::Error)` - 连接或初始化失败
pub async fn init_pool(settings: &DatabaseSettings) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections.unwrap_or(5))
        .connect(&settings.url)
        .await?;

    ensure_schema(&pool).await?;

    info!(url = %settings.url, "database pool initialized");
    Ok(pool)
}

/// 创建缺失的表
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            source_url TEXT PRIMARY KEY,
            data TEXT NOT NULL,
            scraped_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
