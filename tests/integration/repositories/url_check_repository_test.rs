// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::create_test_db;
use page_analyzer::domain::models::url_check::NewUrlCheck;
use page_analyzer::domain::repositories::url_check_repository::UrlCheckRepository;
use page_analyzer::domain::repositories::url_repository::{RepositoryError, UrlRepository};
use page_analyzer::infrastructure::repositories::url_check_repo_impl::UrlCheckRepositoryImpl;
use page_analyzer::infrastructure::repositories::url_repo_impl::UrlRepositoryImpl;

#[tokio::test]
async fn test_checks_are_listed_newest_first() {
    let db = create_test_db().await;
    let urls = UrlRepositoryImpl::new(db.clone());
    let checks = UrlCheckRepositoryImpl::new(db);
    let url_id = urls.create("https://example.com").await.unwrap();

    let older = checks
        .create(&NewUrlCheck {
            url_id,
            status_code: Some(200),
            h1: Some("Hello".to_string()),
            title: Some("Hi".to_string()),
            description: Some("D".to_string()),
        })
        .await
        .unwrap();
    let newer = checks
        .create(&NewUrlCheck {
            url_id,
            status_code: Some(301),
            h1: None,
            title: None,
            description: None,
        })
        .await
        .unwrap();

    let history = checks.find_by_url_id(url_id).await.unwrap();

    assert_eq!(
        history.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![newer, older]
    );
    assert_eq!(history[1].h1.as_deref(), Some("Hello"));
    assert_eq!(history[1].title.as_deref(), Some("Hi"));
    assert_eq!(history[1].description.as_deref(), Some("D"));
    assert_eq!(history[0].h1, None);
    assert!(history.iter().all(|c| c.url_id == url_id));
}

#[tokio::test]
async fn test_check_for_unknown_url_is_not_found() {
    let db = create_test_db().await;
    let checks = UrlCheckRepositoryImpl::new(db);

    let err = checks
        .create(&NewUrlCheck {
            url_id: 999,
            status_code: Some(200),
            h1: None,
            title: None,
            description: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::NotFound), "got {err:?}");
}

#[tokio::test]
async fn test_url_without_checks_has_empty_history() {
    let db = create_test_db().await;
    let urls = UrlRepositoryImpl::new(db.clone());
    let checks = UrlCheckRepositoryImpl::new(db);
    let url_id = urls.create("https://example.com").await.unwrap();

    assert!(checks.find_by_url_id(url_id).await.unwrap().is_empty());
}
