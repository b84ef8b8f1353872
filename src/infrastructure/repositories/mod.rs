// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口基于 SeaORM 的实现
pub mod url_check_repo_impl;
pub mod url_repo_impl;

use crate::domain::repositories::url_repository::RepositoryError;
use sea_orm::{DbErr, SqlErr};

/// 将写操作的数据库错误映射为仓库错误
///
/// 唯一约束冲突映射为 `Conflict`，外键冲突映射为 `NotFound`。
pub(crate) fn map_write_err(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Conflict(detail),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => RepositoryError::NotFound,
        _ => RepositoryError::Database(err),
    }
}
