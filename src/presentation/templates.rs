// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! askama 模板结构体，每个结构体对应 `templates/` 下的一个 HTML 模板

use askama::Template;
use chrono::{DateTime, Utc};

use crate::domain::models::{
    url::{Url, UrlWithLatestCheck},
    url_check::UrlCheck,
};
use crate::presentation::flash::FlashMessage;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// 页面顶部的提示
pub struct FlashView {
    pub category: &'static str,
    pub text: String,
}

impl From<FlashMessage> for FlashView {
    fn from(message: FlashMessage) -> Self {
        Self {
            category: message.category.as_str(),
            text: message.text,
        }
    }
}

/// 站点列表中的一行
pub struct UrlRow {
    pub id: i32,
    pub name: String,
    pub last_checked_at: String,
    pub last_status_code: String,
}

impl From<UrlWithLatestCheck> for UrlRow {
    fn from(url: UrlWithLatestCheck) -> Self {
        Self {
            id: url.id,
            name: url.name,
            last_checked_at: url.last_checked_at.as_ref().map(format_date).unwrap_or_default(),
            last_status_code: url
                .last_status_code
                .map(|code| code.to_string())
                .unwrap_or_default(),
        }
    }
}

/// 检查历史中的一行
pub struct CheckRow {
    pub id: i32,
    pub status_code: String,
    pub h1: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
}

impl From<UrlCheck> for CheckRow {
    fn from(check: UrlCheck) -> Self {
        Self {
            id: check.id,
            status_code: check.status_code.map(|c| c.to_string()).unwrap_or_default(),
            h1: check.h1.unwrap_or_default(),
            title: check.title.unwrap_or_default(),
            description: check.description.unwrap_or_default(),
            created_at: format_date(&check.created_at),
        }
    }
}

/// 首页：提交表单
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub flash: Option<FlashView>,
    pub url_value: String,
    pub error: Option<String>,
}

/// 站点列表页
#[derive(Template)]
#[template(path = "urls/index.html")]
pub struct UrlsTemplate {
    pub flash: Option<FlashView>,
    pub rows: Vec<UrlRow>,
}

/// 站点详情页
#[derive(Template)]
#[template(path = "urls/show.html")]
pub struct UrlTemplate {
    pub flash: Option<FlashView>,
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub checks: Vec<CheckRow>,
}

impl UrlTemplate {
    pub fn new(flash: Option<FlashView>, url: Url, checks: Vec<UrlCheck>) -> Self {
        Self {
            flash,
            id: url.id,
            name: url.name,
            created_at: format_date(&url.created_at),
            checks: checks.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub flash: Option<FlashView>,
}

#[derive(Template)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate {
    pub flash: Option<FlashView>,
}
