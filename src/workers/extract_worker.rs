// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{error, info};

use crate::domain::services::pipeline_service::PipelineService;
use crate::queue::task_queue::TaskQueue;

/// 提取工作器
///
/// 循环从队列取出任务并执行提取流水线。
/// 单个任务的失败只记录日志，不影响后续任务。
pub struct ExtractWorker {
    worker_id: usize,
    queue: Arc<dyn TaskQueue>,
    pipeline: Arc<PipelineService>,
}

impl ExtractWorker {
    pub fn new(worker_id: usize, queue: Arc<dyn TaskQueue>, pipeline: Arc<PipelineService>) -> Self {
        Self {
            worker_id,
            queue,
            pipeline,
        }
    }

    /// 运行工作循环，队列关闭后返回
    pub async fn run(&self) {
        info!(worker_id = self.worker_id, "extract worker started");

        while let Some(task) = self.queue.dequeue().await {
            info!(
                worker_id = self.worker_id,
                task_id = %task.id,
                url = %task.url,
                "processing extraction task"
            );

            let result = self.pipeline.run(&task.url).await;
            if result.success {
                info!(
                    worker_id = self.worker_id,
                    task_id = %task.id,
                    "extraction task completed"
                );
            } else {
                error!(
                    worker_id = self.worker_id,
                    task_id = %task.id,
                    error = result.error.as_deref().unwrap_or("unknown"),
                    "extraction task failed"
                );
            }
        }

        info!(worker_id = self.worker_id, "extract worker stopped");
    }
}
