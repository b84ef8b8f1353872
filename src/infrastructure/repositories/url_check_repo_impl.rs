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
use crate::domain::models::url_check::{NewUrlCheck, UrlCheck};
use crate::domain::repositories::url_check_repository::UrlCheckRepository;
use crate::domain::repositories::url_repository::RepositoryError;
use crate::infrastructure::database::entities::{url, url_check};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use std::sync::Arc;
use tracing::debug;

/// 检查记录仓库实现
#[derive(Clone)]
pub struct UrlCheckRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl UrlCheckRepositoryImpl {
    /// 创建新的检查记录仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UrlCheckRepository for UrlCheckRepositoryImpl {
    async fn create(&self, check: &NewUrlCheck) -> Result<i32, RepositoryError> {
        let txn = self.db.begin().await?;

        // Unknown urls are rejected before the insert reaches the foreign key
        if url::Entity::find_by_id(check.url_id).one(&txn).await?.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let active_model = url_check::ActiveModel {
            url_id: Set(check.url_id),
            status_code: Set(check.status_code),
            h1: Set(check.h1.clone()),
            title: Set(check.title.clone()),
            description: Set(check.description.clone()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let result = url_check::Entity::insert(active_model)
            .exec(&txn)
            .await
            .map_err(map_write_err)?;

        txn.commit().await?;

        debug!(
            id = result.last_insert_id,
            url_id = check.url_id,
            status_code = ?check.status_code,
            "Inserted url check"
        );
        Ok(result.last_insert_id)
    }

    async fn find_by_url_id(&self, url_id: i32) -> Result<Vec<UrlCheck>, RepositoryError> {
        let txn = self.db.begin().await?;

        let models = url_check::Entity::find()
            .filter(url_check::Column::UrlId.eq(url_id))
            .order_by_desc(url_check::Column::CreatedAt)
            .order_by_desc(url_check::Column::Id)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
