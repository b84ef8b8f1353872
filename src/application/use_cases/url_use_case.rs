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

use crate::{
    domain::{
        models::{
            url::{Url, UrlWithLatestCheck},
            url_check::{NewUrlCheck, UrlCheck},
        },
        repositories::{
            url_check_repository::UrlCheckRepository,
            url_repository::{RepositoryError, UrlRepository},
        },
        services::{
            page_checker::PageChecker,
            url_normalizer::{self, ValidationError},
        },
    },
    engines::traits::{FetchError, PageFetcher},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum UrlUseCaseError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Url not found")]
    NotFound,
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UrlUseCaseError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => UrlUseCaseError::NotFound,
            other => UrlUseCaseError::Repository(other),
        }
    }
}

/// 提交站点的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddUrlOutcome {
    /// 新插入的站点
    Added(i32),
    /// 规范化后已存在的站点
    AlreadyExists(i32),
}

impl AddUrlOutcome {
    pub fn id(&self) -> i32 {
        match self {
            AddUrlOutcome::Added(id) | AddUrlOutcome::AlreadyExists(id) => *id,
        }
    }
}

/// 单次检查的结果
#[derive(Debug)]
pub enum CheckStatus {
    /// 已写入新的检查记录
    Checked(UrlCheck),
    /// 抓取失败，未写入记录
    Failed(FetchError),
}

#[derive(Debug)]
pub struct RunCheckOutcome {
    pub url: Url,
    pub status: CheckStatus,
    /// 站点全部检查记录，最新在前
    pub checks: Vec<UrlCheck>,
}

pub struct UrlUseCase<UR, CR, F> {
    url_repo: Arc<UR>,
    check_repo: Arc<CR>,
    checker: PageChecker<F>,
}

impl<UR, CR, F> UrlUseCase<UR, CR, F>
where
    UR: UrlRepository + 'static,
    CR: UrlCheckRepository + 'static,
    F: PageFetcher + 'static,
{
    pub fn new(url_repo: Arc<UR>, check_repo: Arc<CR>, fetcher: Arc<F>) -> Self {
        Self {
            url_repo,
            check_repo,
            checker: PageChecker::new(fetcher),
        }
    }

    /// 提交一个站点
    ///
    /// 校验并规范化输入，按规范化名称去重。并发提交同一站点时，
    /// 唯一约束冲突会重新查询并报告为已存在。
    pub async fn add_url(&self, raw: &str) -> Result<AddUrlOutcome, UrlUseCaseError> {
        url_normalizer::validate(raw)?;
        let name = url_normalizer::normalize(raw);

        if let Some(existing) = self.url_repo.find_by_name(&name).await? {
            return Ok(AddUrlOutcome::AlreadyExists(existing.id));
        }

        match self.url_repo.create(&name).await {
            Ok(id) => {
                info!(id, name = %name, "Url added");
                Ok(AddUrlOutcome::Added(id))
            }
            Err(RepositoryError::Conflict(detail)) => {
                warn!(name = %name, detail = %detail, "Concurrent insert, resolving existing url");
                let existing = self
                    .url_repo
                    .find_by_name(&name)
                    .await?
                    .ok_or(RepositoryError::Conflict(detail))?;
                Ok(AddUrlOutcome::AlreadyExists(existing.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 对站点执行一次检查
    ///
    /// 抓取失败不写入记录，只在结果中报告。
    pub async fn run_check(&self, id: i32) -> Result<RunCheckOutcome, UrlUseCaseError> {
        let url = self
            .url_repo
            .find_by_id(id)
            .await?
            .ok_or(UrlUseCaseError::NotFound)?;

        let recorded = match self.checker.check(&url.name).await {
            Ok(result) => {
                let new_check = NewUrlCheck::from_result(url.id, result);
                Ok(self.check_repo.create(&new_check).await?)
            }
            Err(e) => Err(e),
        };

        let checks = self.check_repo.find_by_url_id(url.id).await?;
        let status = match recorded {
            Ok(check_id) => {
                let check = checks
                    .iter()
                    .find(|c| c.id == check_id)
                    .cloned()
                    .ok_or(UrlUseCaseError::NotFound)?;
                info!(url_id = url.id, check_id, "Check recorded");
                CheckStatus::Checked(check)
            }
            Err(e) => CheckStatus::Failed(e),
        };

        Ok(RunCheckOutcome {
            url,
            status,
            checks,
        })
    }

    /// 列出所有站点及最近一次检查
    pub async fn list_urls(&self) -> Result<Vec<UrlWithLatestCheck>, UrlUseCaseError> {
        Ok(self.url_repo.list_with_latest_check().await?)
    }

    /// 查询站点及其检查历史
    pub async fn show_url(&self, id: i32) -> Result<(Url, Vec<UrlCheck>), UrlUseCaseError> {
        let url = self
            .url_repo
            .find_by_id(id)
            .await?
            .ok_or(UrlUseCaseError::NotFound)?;
        let checks = self.check_repo.find_by_url_id(url.id).await?;
        Ok((url, checks))
    }
}

#[cfg(test)]
#[path = "url_use_case_test.rs"]
mod tests;
