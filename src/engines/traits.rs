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

use async_trait::async_trait;
use thiserror::Error;

/// 重试分类
///
/// 每种失败类型对重试循环的影响，由两种引擎统一应用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// 不重试，立即返回失败
    NonRetryable,
    /// 可重试，继续下一次尝试
    Retryable,
    /// 中止重试循环，不消耗剩余尝试次数
    AbortRetryLoop,
}

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 服务器明确返回了错误状态码
    #[error("server rejected request with status {status}")]
    ServerRejected { status: u16 },

    /// 请求超时
    #[error("request timed out")]
    Timeout,

    /// 连接层故障
    #[error("transport failure: {0}")]
    Transport(String),

    /// 浏览器会话故障
    #[error("browser failure: {0}")]
    Browser(String),

    /// 所有重试次数耗尽
    #[error("max retries exceeded")]
    Exhausted,
}

impl FetchError {
    /// 该错误对应的重试分类
    ///
    /// 服务器已明确响应的错误不再重试；超时和浏览器会话故障
    /// 可以重试；连接层故障中止整个循环
    pub fn retry_class(&self) -> RetryClass {
        match self {
            FetchError::ServerRejected { .. } => RetryClass::NonRetryable,
            FetchError::Timeout => RetryClass::Retryable,
            FetchError::Browser(_) => RetryClass::Retryable,
            FetchError::Transport(_) => RetryClass::AbortRetryLoop,
            FetchError::Exhausted => RetryClass::NonRetryable,
        }
    }

    /// 错误中携带的HTTP状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::ServerRejected { status } => Some(*status),
            _ => None,
        }
    }
}

/// 抓取成功得到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 页面HTML内容
    pub html: String,
    /// 跟随重定向后的最终URL
    pub final_url: String,
    /// HTTP状态码
    pub status_code: u16,
}

/// 抓取引擎特质
///
/// 静态与动态两种策略实现同一接口，由调用方决定选用哪个
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// 抓取页面，内部按配置的策略执行重试
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert_eq!(
            FetchError::ServerRejected { status: 404 }.retry_class(),
            RetryClass::NonRetryable
        );
        assert_eq!(FetchError::Timeout.retry_class(), RetryClass::Retryable);
        assert_eq!(
            FetchError::Browser("no response".into()).retry_class(),
            RetryClass::Retryable
        );
        assert_eq!(
            FetchError::Transport("connection reset".into()).retry_class(),
            RetryClass::AbortRetryLoop
        );
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(FetchError::ServerRejected { status: 503 }.status(), Some(503));
        assert_eq!(FetchError::Exhausted.status(), None);
    }
}
