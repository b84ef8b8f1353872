// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::url::{Url, UrlWithLatestCheck};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 启动阶段多次尝试后仍无法连接数据库
    #[error("Failed to connect to database after {attempts} attempts: {source}")]
    ConnectFailed {
        attempts: u32,
        #[source]
        source: DbErr,
    },
    /// 违反唯一约束
    #[error("Record already exists: {0}")]
    Conflict(String),
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 站点仓库特质
///
/// 定义站点数据访问接口。每个方法在独立事务中执行，
/// 成功时提交，失败时回滚。
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// 根据规范化名称精确查找站点
    ///
    /// # 参数
    ///
    /// * `name` - 规范化后的站点地址
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(Url))` - 找到站点
    /// * `Ok(None)` - 未找到
    /// * `Err(RepositoryError)` - 查询失败
    async fn find_by_name(&self, name: &str) -> Result<Option<Url>, RepositoryError>;

    /// 根据ID查找站点
    async fn find_by_id(&self, id: i32) -> Result<Option<Url>, RepositoryError>;

    /// 插入新站点
    ///
    /// # 返回值
    ///
    /// * `Ok(i32)` - 新站点的ID
    /// * `Err(RepositoryError::Conflict)` - 同名站点已存在
    /// * `Err(RepositoryError)` - 其它失败
    async fn create(&self, name: &str) -> Result<i32, RepositoryError>;

    /// 列出所有站点及其最近一次检查
    ///
    /// 每个站点恰好一行，按创建时间倒序
    async fn list_with_latest_check(&self) -> Result<Vec<UrlWithLatestCheck>, RepositoryError>;
}
