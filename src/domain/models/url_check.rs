// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};

/// 站点检查记录
///
/// 一次成功抓取的结果，创建后不可修改。
/// 只有拿到 2xx 响应的检查才会落库。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    pub id: i32,
    /// 所属站点ID
    pub url_id: i32,
    /// HTTP状态码
    pub status_code: Option<i32>,
    /// 第一个 `<h1>` 的文本
    pub h1: Option<String>,
    /// `<title>` 的文本
    pub title: Option<String>,
    /// `<meta name="description">` 的 content
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 从页面中提取的 SEO 元数据
///
/// 缺失的标签对应 `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// 一次页面检查的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// 响应状态码
    pub status_code: u16,
    /// 页面元数据
    pub metadata: PageMetadata,
}

/// 待写入的检查记录
///
/// ID 和创建时间由存储层生成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlCheck {
    pub url_id: i32,
    pub status_code: Option<i32>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewUrlCheck {
    /// 由检查结果构造待写入记录
    pub fn from_result(url_id: i32, result: CheckResult) -> Self {
        Self {
            url_id,
            status_code: Some(i32::from(result.status_code)),
            h1: result.metadata.h1,
            title: result.metadata.title,
            description: result.metadata.description,
        }
    }
}
