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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含数据库、服务器、页面抓取、安全和日志等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 页面抓取配置
    pub fetcher: FetcherSettings,
    /// 安全配置
    pub security: SecuritySettings,
    /// 日志配置
    pub log: LogSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
    /// 启动时连接数据库的最大尝试次数
    pub connect_attempts: u32,
    /// 两次连接尝试之间的固定间隔（毫秒）
    pub connect_retry_delay_ms: u64,
    /// 是否输出 SQL 日志
    pub sqlx_logging: bool,
}

impl DatabaseSettings {
    /// 使用默认连接池参数构造配置
    ///
    /// 测试和一次性工具使用，避免手写所有可选字段
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
            connect_attempts: 1,
            connect_retry_delay_ms: 0,
            sqlx_logging: false,
        }
    }
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 页面抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherSettings {
    /// 单次请求总超时（秒）
    pub timeout_secs: u64,
    /// 建立连接超时（秒）
    pub connect_timeout_secs: u64,
    /// 最多跟随的重定向次数
    pub max_redirects: usize,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl FetcherSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            connect_timeout_secs: 3,
            max_redirects: 10,
            user_agent: format!("page-analyzer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// 安全配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// Flash 消息签名密钥
    pub secret_key: String,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// 是否以 JSON 格式输出日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 加载顺序：内置默认值 → config/default → config/{APP_ENVIRONMENT} →
    /// `PAGE_ANALYZER__*` 环境变量 → `DATABASE_URL` / `SECRET_KEY` / `PORT`
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let fetcher = FetcherSettings::default();
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Default DB pool settings
            .set_default("database.url", "postgres://localhost/page_analyzer")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            .set_default("database.connect_attempts", 5)?
            .set_default("database.connect_retry_delay_ms", 2000)?
            .set_default("database.sqlx_logging", false)?
            // Default fetcher settings
            .set_default("fetcher.timeout_secs", fetcher.timeout_secs)?
            .set_default("fetcher.connect_timeout_secs", fetcher.connect_timeout_secs)?
            .set_default("fetcher.max_redirects", fetcher.max_redirects as u64)?
            .set_default("fetcher.user_agent", fetcher.user_agent)?
            .set_default("security.secret_key", "change-me")?
            .set_default("log.json", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PAGE_ANALYZER").separator("__"))
            // Conventional variables used by hosting platforms
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("security.secret_key", std::env::var("SECRET_KEY").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
