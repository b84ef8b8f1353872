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

use crate::config::settings::FetcherSettings;
use crate::engines::traits::{FetchError, FetchedPage, PageFetcher};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于 reqwest 的页面抓取器，进程内共享一个客户端
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// 根据配置创建抓取器
    ///
    /// # 参数
    ///
    /// * `settings` - 超时、重定向次数和 User-Agent
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestFetcher)` - 抓取器
    /// * `Err(FetchError)` - HTTP 客户端构建失败
    pub fn new(settings: &FetcherSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .connect_timeout(settings.connect_timeout())
            .redirect(Policy::limited(settings.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标地址
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedPage)` - 2xx 响应及其正文
    /// * `Err(FetchError)` - 超时、连接失败、非 2xx 或正文解码失败
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;

        debug!(
            url,
            final_url = %final_url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page fetched"
        );

        Ok(FetchedPage {
            status_code: status.as_u16(),
            final_url,
            body,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
