// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::create_test_db;
use chrono::{Duration, Utc};
use migration::{Migrator, MigratorTrait};
use page_analyzer::config::settings::DatabaseSettings;
use page_analyzer::domain::models::url_check::NewUrlCheck;
use page_analyzer::domain::repositories::url_check_repository::UrlCheckRepository;
use page_analyzer::domain::repositories::url_repository::{RepositoryError, UrlRepository};
use page_analyzer::infrastructure::database::connection;
use page_analyzer::infrastructure::database::entities::url_check;
use page_analyzer::infrastructure::repositories::url_check_repo_impl::UrlCheckRepositoryImpl;
use page_analyzer::infrastructure::repositories::url_repo_impl::UrlRepositoryImpl;
use sea_orm::sqlx::Connection;
use sea_orm::{EntityTrait, Set};
use std::sync::Arc;

fn check(url_id: i32, status: i32) -> NewUrlCheck {
    NewUrlCheck {
        url_id,
        status_code: Some(status),
        h1: None,
        title: None,
        description: None,
    }
}

#[tokio::test]
async fn test_create_and_find_url() {
    let db = create_test_db().await;
    let repo = UrlRepositoryImpl::new(db);

    let id = repo.create("https://example.com").await.unwrap();

    let by_id = repo.find_by_id(id).await.unwrap().unwrap();
    let by_name = repo.find_by_name("https://example.com").await.unwrap().unwrap();

    assert_eq!(by_id, by_name);
    assert_eq!(by_id.name, "https://example.com");
    assert!(repo.find_by_name("https://other.com").await.unwrap().is_none());
    assert!(repo.find_by_id(id + 100).await.unwrap().is_none());
}

/// 唯一约束在存储层生效，重复插入报告冲突
#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let db = create_test_db().await;
    let repo = UrlRepositoryImpl::new(db);

    repo.create("https://example.com").await.unwrap();
    let err = repo.create("https://example.com").await.unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)), "got {err:?}");

    // The failed insert was rolled back and the store is still usable
    let listed = repo.list_with_latest_check().await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_list_with_latest_check_one_row_per_url() {
    let db = create_test_db().await;
    let urls = UrlRepositoryImpl::new(db.clone());
    let checks = UrlCheckRepositoryImpl::new(db);

    let first = urls.create("https://first.com").await.unwrap();
    let second = urls.create("https://second.com").await.unwrap();
    let never_checked = urls.create("https://third.com").await.unwrap();

    checks.create(&check(first, 500)).await.unwrap();
    checks.create(&check(first, 200)).await.unwrap();
    checks.create(&check(second, 404)).await.unwrap();

    let listed = urls.list_with_latest_check().await.unwrap();

    // Newest url first
    let ids: Vec<i32> = listed.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![never_checked, second, first]);

    assert_eq!(listed[0].last_status_code, None);
    assert_eq!(listed[0].last_checked_at, None);
    assert_eq!(listed[1].last_status_code, Some(404));
    assert_eq!(listed[2].last_status_code, Some(200));
    assert!(listed[2].last_checked_at.is_some());
}

#[tokio::test]
async fn test_empty_store_lists_nothing() {
    let db = create_test_db().await;
    let repo = UrlRepositoryImpl::new(db);

    assert!(repo.list_with_latest_check().await.unwrap().is_empty());
}

/// 最新检查按 created_at 决定，而不是按插入顺序或ID
#[tokio::test]
async fn test_latest_check_is_chosen_by_created_at() {
    let db = create_test_db().await;
    let urls = UrlRepositoryImpl::new(db.clone());
    let checks = UrlCheckRepositoryImpl::new(db.clone());
    let url_id = urls.create("https://example.com").await.unwrap();

    let now = Utc::now();
    let rows = [
        (200, now),
        (500, now - Duration::hours(1)),
        (301, now - Duration::milliseconds(1500)),
    ];
    for (status, created_at) in rows {
        url_check::Entity::insert(url_check::ActiveModel {
            url_id: Set(url_id),
            status_code: Set(Some(status)),
            h1: Set(None),
            title: Set(None),
            description: Set(None),
            created_at: Set(created_at.into()),
            ..Default::default()
        })
        .exec(db.as_ref())
        .await
        .unwrap();
    }

    let listed = urls.list_with_latest_check().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].last_status_code, Some(200));
    let last_checked_at = listed[0].last_checked_at.unwrap();
    assert_eq!((last_checked_at - now).num_milliseconds(), 0);

    let history = checks.find_by_url_id(url_id).await.unwrap();
    assert_eq!(
        history.iter().map(|c| c.status_code).collect::<Vec<_>>(),
        vec![Some(200), Some(301), Some(500)]
    );
}

/// 池中的连接被关闭后，下一次仓库调用透明地建立新连接
#[tokio::test]
async fn test_store_recovers_after_pooled_connection_is_closed() {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "page_analyzer_reconnect_{}_{}.sqlite",
        std::process::id(),
        nanos
    ));
    let mut settings = DatabaseSettings::with_url(format!("sqlite://{}?mode=rwc", path.display()));
    settings.max_connections = Some(1);

    let db = connection::connect_with_retry(&settings).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let db = Arc::new(db);
    let repo = UrlRepositoryImpl::new(db.clone());

    let id = repo.create("https://example.com").await.unwrap();
    assert!(repo.find_by_id(id).await.unwrap().is_some());

    // Take the only pooled connection out and close it underneath the store
    let pool = db.get_sqlite_connection_pool();
    let pooled = pool.acquire().await.unwrap();
    pooled.detach().close().await.unwrap();
    assert_eq!(pool.size(), 0);

    let found = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.name, "https://example.com");
    assert_eq!(pool.size(), 1);

    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
}
