// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::services::pipeline_service::PipelineService;
use crate::queue::task_queue::TaskQueue;
use crate::workers::extract_worker::ExtractWorker;

/// 工作器管理器
///
/// 启动固定数量的工作器并持有其任务句柄，关闭时统一中止。
pub struct WorkerManager {
    queue: Arc<dyn TaskQueue>,
    pipeline: Arc<PipelineService>,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn new(queue: Arc<dyn TaskQueue>, pipeline: Arc<PipelineService>) -> Self {
        Self {
            queue,
            pipeline,
            handles: Vec::new(),
        }
    }

    /// 启动指定数量的工作器
    pub fn start_workers(&mut self, count: usize) {
        info!(count, "starting extract workers");
        for worker_id in 0..count {
            let worker = ExtractWorker::new(
                worker_id,
                Arc::clone(&self.queue),
                Arc::clone(&self.pipeline),
            );
            self.handles.push(tokio::spawn(async move {
                worker.run().await;
            }));
        }
    }

    /// 中止所有工作器
    pub fn shutdown(&mut self) {
        info!("shutting down extract workers");
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}
