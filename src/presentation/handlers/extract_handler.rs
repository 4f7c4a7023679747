// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use crate::application::dto::extract_request::ExtractRequestDto;
use crate::application::dto::extract_response::ExtractResponseDto;
use crate::queue::task_queue::{ExtractionTask, QueueError, TaskQueue};

/// 受理提取请求
///
/// 任务入队后立即返回202，提取在后台工作器中异步完成
pub async fn trigger_extract(
    Extension(queue): Extension<Arc<dyn TaskQueue>>,
    Json(payload): Json<ExtractRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })),
        )
            .into_response();
    }

    let task = ExtractionTask::new(payload.url.clone());
    let task_id = task.id;

    match queue.enqueue(task).await {
        Ok(()) => {
            info!(task_id = %task_id, url = %payload.url, "extraction task accepted");
            (
                StatusCode::ACCEPTED,
                Json(ExtractResponseDto {
                    success: true,
                    id: task_id,
                    url: payload.url,
                    message: "Extraction started in background".to_string(),
                }),
            )
                .into_response()
        }
        Err(QueueError::Full) => {
            warn!(url = %payload.url, "task queue is full, rejecting request");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Task queue is full, try again later."
                })),
            )
                .into_response()
        }
        Err(QueueError::Closed) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "success": false,
                "error": "Task queue is unavailable."
            })),
        )
            .into_response(),
    }
}
