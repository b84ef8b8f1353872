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

use crate::config::settings::DatabaseSettings;
use crate::domain::repositories::url_repository::RepositoryError;
use crate::utils::retry_policy::RetryPolicy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::{error, info, warn};

/// 创建数据库连接池
///
/// 连接在取出前会先做存活检测，已关闭的连接由连接池透明替换。
///
/// # 参数
///
/// * `settings` - 数据库配置
///
/// # 返回值
///
/// * `Ok(DatabaseConnection)` - 数据库连接
/// * `Err(DbErr)` - 连接过程中出现的错误
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(settings.url.to_owned());

    if let Some(max) = settings.max_connections {
        opt.max_connections(max);
    }

    if let Some(min) = settings.min_connections {
        opt.min_connections(min);
    }

    if let Some(timeout) = settings.connect_timeout {
        opt.connect_timeout(Duration::from_secs(timeout));
        opt.acquire_timeout(Duration::from_secs(timeout));
    }

    if let Some(idle) = settings.idle_timeout {
        opt.idle_timeout(Duration::from_secs(idle));
    }

    opt.max_lifetime(Duration::from_secs(3600))
        .test_before_acquire(true)
        .sqlx_logging(settings.sqlx_logging);

    Database::connect(opt).await
}

/// 在启动阶段带重试地连接数据库
///
/// 以固定间隔重试有限次数，用于容忍进程启动时尚未就绪的数据库。
///
/// # 返回值
///
/// * `Ok(DatabaseConnection)` - 数据库连接
/// * `Err(RepositoryError::ConnectFailed)` - 所有尝试均失败
pub async fn connect_with_retry(
    settings: &DatabaseSettings,
) -> Result<DatabaseConnection, RepositoryError> {
    let policy = RetryPolicy::fixed(
        settings.connect_attempts,
        Duration::from_millis(settings.connect_retry_delay_ms),
    );

    let mut attempt = 0;
    loop {
        attempt += 1;
        match create_pool(settings).await {
            Ok(db) => {
                info!(attempt, "Database connection established");
                return Ok(db);
            }
            Err(e) if policy.should_retry(attempt) => {
                let delay = policy.delay();
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Database not ready, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!(attempt, error = %e, "Giving up connecting to database");
                return Err(RepositoryError::ConnectFailed {
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }
}
