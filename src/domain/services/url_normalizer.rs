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

use std::net::Ipv4Addr;
use thiserror::Error;
use url::{Host, Url};

/// 用户输入允许的最大长度（字符数）
pub const MAX_URL_LENGTH: usize = 255;

/// 验证错误类型
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// 输入为空或只有空白
    #[error("URL is required")]
    Empty,
    /// 不是带 http/https 协议和主机的绝对地址
    #[error("Invalid URL")]
    Malformed,
    /// 原始输入超过长度限制
    #[error("URL exceeds 255 characters")]
    TooLong,
}

impl ValidationError {
    /// 面向用户的提示文本
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::Empty => "URL обязателен",
            ValidationError::Malformed => "Некорректный URL",
            ValidationError::TooLong => "URL превышает 255 символов",
        }
    }
}

/// 验证用户提交的地址
///
/// 依次检查：是否为空、是否是合法的 http/https 绝对地址、原始长度是否超限。
///
/// # 参数
///
/// * `raw` - 用户原始输入
///
/// # 返回值
///
/// * `Ok(())` - 地址有效
/// * `Err(ValidationError)` - 第一个未通过的检查
pub fn validate(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    if parse_site_url(trimmed).is_none() {
        return Err(ValidationError::Malformed);
    }

    // Measured on the raw input; normalization only ever shortens it
    if raw.chars().count() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong);
    }

    Ok(())
}

/// 将地址规范化为 `scheme://host[:port]`
///
/// 协议和主机转为小写，丢弃路径、查询、片段、凭据和默认端口。
/// 国际化域名以 punycode 形式保存（`пример.рф` → `xn--e1afmkfd.xn--p1ai`），
/// 这是站点名称的规范形式。
/// 该函数是幂等的。无法解析的输入按原样（去空白、小写）返回。
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(parsed) = Url::parse(trimmed) else {
        return trimmed.to_lowercase();
    };
    let Some(host) = parsed.host_str() else {
        return trimmed.to_lowercase();
    };

    let mut normalized = format!("{}://{}", parsed.scheme(), host.to_lowercase());
    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized
}

fn parse_site_url(input: &str) -> Option<Url> {
    if input.chars().any(char::is_whitespace) {
        return None;
    }

    // `Url::parse` accepts "http:example.com" for special schemes
    let lower = input.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return None;
    }

    let parsed = Url::parse(input).ok()?;
    match parsed.host()? {
        Host::Domain(domain) if is_valid_domain(domain) => Some(parsed),
        Host::Domain(_) => None,
        // The parser widens "123" or "1.2.3" into an address; only a typed dotted quad counts
        Host::Ipv4(_) => {
            literal_host(input)?.parse::<Ipv4Addr>().ok()?;
            Some(parsed)
        }
        Host::Ipv6(_) => Some(parsed),
    }
}

/// 输入中主机部分的原文（去掉凭据和端口）
fn literal_host(input: &str) -> Option<&str> {
    let (_, rest) = input.split_once("://")?;
    let authority = rest.split(|c| matches!(c, '/' | '?' | '#')).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    Some(host_port.rsplit_once(':').map_or(host_port, |(host, _)| host))
}

fn is_valid_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
