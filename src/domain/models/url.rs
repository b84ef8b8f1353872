// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};

/// 站点实体
///
/// `name` 始终是规范化后的 `scheme://host[:port]` 形式，并在存储层唯一。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// 由数据库生成的主键
    pub id: i32,
    /// 规范化后的站点地址
    pub name: String,
    /// 插入时间
    pub created_at: DateTime<Utc>,
}

/// 站点列表行
///
/// 每个站点一行，附带最近一次检查的时间和状态码（可能没有检查记录）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlWithLatestCheck {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// 最近一次检查的时间
    pub last_checked_at: Option<DateTime<Utc>>,
    /// 最近一次检查的 HTTP 状态码
    pub last_status_code: Option<i32>,
}
