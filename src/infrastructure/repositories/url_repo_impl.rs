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

use super::map_write_err;
use crate::domain::models::url::{Url, UrlWithLatestCheck};
use crate::domain::repositories::url_repository::{RepositoryError, UrlRepository};
use crate::infrastructure::database::entities::url;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::*;
use std::sync::Arc;
use tracing::debug;

/// 每个站点一行，左连接按 (created_at, id) 取最新的一次检查
const LIST_WITH_LATEST_CHECK_SQL: &str = r#"
SELECT
    u.id,
    u.name,
    u.created_at,
    c.created_at AS last_checked_at,
    c.status_code AS last_status_code
FROM urls u
LEFT JOIN url_checks c ON c.id = (
    SELECT latest.id FROM url_checks latest
    WHERE latest.url_id = u.id
    ORDER BY latest.created_at DESC, latest.id DESC
    LIMIT 1
)
ORDER BY u.created_at DESC, u.id DESC
"#;

#[derive(Debug, FromQueryResult)]
struct LatestCheckRow {
    id: i32,
    name: String,
    created_at: DateTimeWithTimeZone,
    last_checked_at: Option<DateTimeWithTimeZone>,
    last_status_code: Option<i32>,
}

impl From<LatestCheckRow> for UrlWithLatestCheck {
    fn from(row: LatestCheckRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at.into(),
            last_checked_at: row.last_checked_at.map(Into::into),
            last_status_code: row.last_status_code,
        }
    }
}

/// 站点仓库实现
#[derive(Clone)]
pub struct UrlRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UrlRepositoryImpl {
    /// 创建新的站点仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UrlRepository for UrlRepositoryImpl {
    async fn find_by_name(&self, name: &str) -> Result<Option<Url>, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = url::Entity::find()
            .filter(url::Column::Name.eq(name))
            .one(&txn)
            .await?;

        txn.commit().await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Url>, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = url::Entity::find_by_id(id).one(&txn).await?;

        txn.commit().await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, name: &str) -> Result<i32, RepositoryError> {
        let txn = self.db.begin().await?;

        let active_model = url::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        // Dropping the transaction on error rolls it back
        let result = url::Entity::insert(active_model)
            .exec(&txn)
            .await
            .map_err(map_write_err)?;

        txn.commit().await?;

        debug!(id = result.last_insert_id, name, "Inserted url");
        Ok(result.last_insert_id)
    }

    async fn list_with_latest_check(&self) -> Result<Vec<UrlWithLatestCheck>, RepositoryError> {
        let txn = self.db.begin().await?;

        let rows = LatestCheckRow::find_by_statement(Statement::from_string(
            txn.get_database_backend(),
            LIST_WITH_LATEST_CHECK_SQL,
        ))
        .all(&txn)
        .await?;

        txn.commit().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
