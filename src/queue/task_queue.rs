// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// 一次提取任务
#[derive(Debug, Clone)]
pub struct ExtractionTask {
    /// 任务ID
    pub id: Uuid,
    /// 待提取的原始URL
    pub url: String,
    /// 任务提交时间
    pub requested_at: DateTime<Utc>,
}

impl ExtractionTask {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            requested_at: Utc::now(),
        }
    }
}

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("任务队列已满")]
    Full,

    #[error("任务队列已关闭")]
    Closed,
}

/// 任务队列接口
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// 提交任务，队列满时立即返回错误而不阻塞
    async fn enqueue(&self, task: ExtractionTask) -> Result<(), QueueError>;

    /// 取出下一个任务，队列关闭时返回None
    async fn dequeue(&self) -> Option<ExtractionTask>;
}

/// 基于内存通道的任务队列
///
/// 有界通道提供背压：达到容量后新任务被拒绝，由API层返回错误。
pub struct MemoryTaskQueue {
    tx: mpsc::Sender<ExtractionTask>,
    rx: tokio::sync::Mutex<mpsc::Receiver<ExtractionTask>>,
}

impl MemoryTaskQueue {
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: tokio::sync::Mutex::new(rx),
        }
    }
}

#[async_trait]
impl TaskQueue for MemoryTaskQueue {
    async fn enqueue(&self, task: ExtractionTask) -> Result<(), QueueError> {
        self.tx.try_send(task).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Full,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    async fn dequeue(&self) -> Option<ExtractionTask> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_enqueue_dequeue_preserves_order() {
        let queue = MemoryTaskQueue::new(8);
        queue.enqueue(ExtractionTask::new("https://a.example")).await.unwrap();
        queue.enqueue(ExtractionTask::new("https://b.example")).await.unwrap();

        assert_eq!(queue.dequeue().await.unwrap().url, "https://a.example");
        assert_eq!(queue.dequeue().await.unwrap().url, "https://b.example");
    }

    #[tokio::test]
    async fn test_full_queue_rejects_without_blocking() {
        let queue = MemoryTaskQueue::new(1);
        queue.enqueue(ExtractionTask::new("https://a.example")).await.unwrap();

        let err = queue
            .enqueue(ExtractionTask::new("https://b.example"))
            .await
            .unwrap_err();
        assert!(matches!(err, QueueError::Full));
    }

    #[tokio::test]
    async fn test_task_ids_are_unique() {
        let a = ExtractionTask::new("https://a.example");
        let b = ExtractionTask::new("https://a.example");
        assert_ne!(a.id, b.id);
    }
}
