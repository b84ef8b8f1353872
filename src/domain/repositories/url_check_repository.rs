// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::url_repository::RepositoryError;
use crate::domain::models::url_check::{NewUrlCheck, UrlCheck};
use async_trait::async_trait;

/// 站点检查仓库特质
#[async_trait]
pub trait UrlCheckRepository: Send + Sync {
    /// 写入一条检查记录
    ///
    /// # 返回值
    ///
    /// * `Ok(i32)` - 新记录的ID
    /// * `Err(RepositoryError::NotFound)` - 所属站点不存在
    async fn create(&self, check: &NewUrlCheck) -> Result<i32, RepositoryError>;

    /// 按时间倒序列出站点的全部检查记录
    async fn find_by_url_id(&self, url_id: i32) -> Result<Vec<UrlCheck>, RepositoryError>;
}
