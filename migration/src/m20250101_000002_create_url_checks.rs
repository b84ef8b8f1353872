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

use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_urls::Urls;

/// 创建 url_checks 表
///
/// 每一行是一次对站点的检查结果，通过外键归属于 urls 中的一行
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UrlChecks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlChecks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlChecks::UrlId).integer().not_null())
                    .col(ColumnDef::new(UrlChecks::StatusCode).integer())
                    .col(ColumnDef::new(UrlChecks::H1).text())
                    .col(ColumnDef::new(UrlChecks::Title).text())
                    .col(ColumnDef::new(UrlChecks::Description).text())
                    .col(
                        ColumnDef::new(UrlChecks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_checks_url_id")
                            .from(UrlChecks::Table, UrlChecks::UrlId)
                            .to(Urls::Table, Urls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-check lookups walk this index
        manager
            .create_index(
                Index::create()
                    .name("idx_url_checks_url_id_created_at")
                    .table(UrlChecks::Table)
                    .col(UrlChecks::UrlId)
                    .col(UrlChecks::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UrlChecks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UrlChecks {
    Table,
    Id,
    UrlId,
    StatusCode,
    H1,
    Title,
    Description,
    CreatedAt,
}
