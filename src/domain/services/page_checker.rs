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

use crate::domain::models::url_check::CheckResult;
use crate::domain::services::page_extractor;
use crate::engines::traits::{FetchError, PageFetcher};
use std::sync::Arc;
use tracing::{info, warn};

/// 页面检查服务
///
/// 抓取页面并提取 SEO 元数据，不做任何持久化
pub struct PageChecker<F> {
    fetcher: Arc<F>,
}

impl<F> PageChecker<F>
where
    F: PageFetcher + 'static,
{
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// 检查一个站点
    ///
    /// # 参数
    ///
    /// * `url` - 规范化后的站点地址
    ///
    /// # 返回值
    ///
    /// * `Ok(CheckResult)` - 状态码和提取到的元数据
    /// * `Err(FetchError)` - 本次检查失败
    pub async fn check(&self, url: &str) -> Result<CheckResult, FetchError> {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url, engine = self.fetcher.name(), error = %e, "Page check failed");
                return Err(e);
            }
        };

        let metadata = page_extractor::extract_metadata(&page.body);
        info!(url, status = page.status_code, "Page checked");

        Ok(CheckResult {
            status_code: page.status_code,
            metadata,
        })
    }
}
