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

use crate::domain::models::url_check::PageMetadata;
use scraper::{Html, Selector};

/// 从 HTML 中提取 SEO 元数据
///
/// 提取第一个 `<title>`、第一个 `<h1>` 的文本以及
/// `<meta name="description">` 的 content。解析容忍任意残缺的 HTML，
/// 缺失的标签得到 `None`，不会报错。
pub fn extract_metadata(html_content: &str) -> PageMetadata {
    let document = Html::parse_document(html_content);

    PageMetadata {
        h1: first_text(&document, "h1"),
        title: first_text(&document, "title"),
        description: meta_description(&document),
    }
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;

    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    non_empty(text)
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;

    let content = document
        .select(&selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })?
        .value()
        .attr("content")?;

    non_empty(content.trim().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
#[path = "page_extractor_test.rs"]
mod tests;
