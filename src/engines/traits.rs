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

/// 抓取错误类型
///
/// 对调用方而言所有变体都表示"本次检查失败"，不会影响进程
#[derive(Error, Debug)]
pub enum FetchError {
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 无法建立连接（拒绝连接、DNS 解析失败等）
    #[error("Connection failed: {0}")]
    ConnectionRefused(String),
    /// 非 2xx 响应
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectionRefused(err.to_string())
        } else {
            FetchError::Other(err.to_string())
        }
    }
}

/// 抓取到的页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP状态码
    pub status_code: u16,
    /// 跟随重定向后的最终地址
    pub final_url: String,
    /// 解码后的响应正文
    pub body: String,
}

/// 页面抓取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 对给定地址发出一次有时限的 GET 请求
    ///
    /// 非 2xx 响应返回 `FetchError::HttpStatus`
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
