// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::domain::models::profile::ScrapedProfile;
use crate::domain::repositories::profile_repository::{ProfileRepository, RepositoryError};

/// 按来源URL查询已提取的记录
///
/// URL作为路径尾部传入，例如 `/v1/profile/https://example.com`
pub async fn get_profile(
    Extension(repository): Extension<Arc<dyn ProfileRepository>>,
    Path(url): Path<String>,
) -> impl IntoResponse {
    let decoded_url = match urlencoding::decode(&url) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => url,
    };

    match lookup_profile(repository.as_ref(), &decoded_url).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "error": "Profile not found. Is it still processing or was the URL invalid?"
            })),
        )
            .into_response(),
        Err(e) => {
            error!(url = %decoded_url, error = %e, "profile lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Failed to query profile."
                })),
            )
                .into_response()
        }
    }
}

/// 查询记录，未命中时去掉尾部斜杠再试一次
pub async fn lookup_profile(
    repository: &dyn ProfileRepository,
    url: &str,
) -> Result<Option<ScrapedProfile>, RepositoryError> {
    if let Some(profile) = repository.find_by_url(url).await? {
        return Ok(Some(profile));
    }

    let stripped = url.trim_end_matches('/');
    if stripped != url {
        return repository.find_by_url(stripped).await;
    }

    Ok(None)
}
