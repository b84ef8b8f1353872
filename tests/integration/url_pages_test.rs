// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{cookie_pair, create_test_app, start_target_site, SAMPLE_PAGE};
use axum::http::{header, HeaderValue, StatusCode};
use page_analyzer::domain::repositories::url_check_repository::UrlCheckRepository;
use page_analyzer::domain::repositories::url_repository::UrlRepository;
use page_analyzer::infrastructure::repositories::url_check_repo_impl::UrlCheckRepositoryImpl;
use page_analyzer::infrastructure::repositories::url_repo_impl::UrlRepositoryImpl;

#[tokio::test]
async fn test_index_renders_form() {
    let app = create_test_app().await;

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains(r#"name="url""#));
}

#[tokio::test]
async fn test_add_url_redirects_and_dedupes() {
    let app = create_test_app().await;

    let first = app
        .server
        .post("/urls")
        .form(&[("url", "https://Example.com/some/path?q=1")])
        .await;
    assert_eq!(first.status_code(), StatusCode::FOUND);
    let location = first.header("location");
    let location = location.to_str().unwrap().to_string();
    assert!(location.starts_with("/urls/"));

    let second = app
        .server
        .post("/urls")
        .form(&[("url", "https://example.com")])
        .await;
    assert_eq!(second.status_code(), StatusCode::FOUND);
    assert_eq!(second.header("location").to_str().unwrap(), location);

    let urls = UrlRepositoryImpl::new(app.db.clone());
    let listed = urls.list_with_latest_check().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "https://example.com");
}

#[tokio::test]
async fn test_flash_message_is_shown_once_after_redirect() {
    let app = create_test_app().await;

    let created = app
        .server
        .post("/urls")
        .form(&[("url", "https://example.com")])
        .await;
    let location = created.header("location").to_str().unwrap().to_string();
    let set_cookie = created.header("set-cookie").to_str().unwrap().to_string();
    let cookie = HeaderValue::from_str(&cookie_pair(&set_cookie)).unwrap();

    let page = app
        .server
        .get(&location)
        .add_header(header::COOKIE, cookie)
        .await;

    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("Страница успешно добавлена"));
    assert!(page.text().contains("example.com"));
    assert!(page
        .header("set-cookie")
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));

    let again = app.server.get(&location).await;
    assert!(!again.text().contains("Страница успешно добавлена"));
}

#[tokio::test]
async fn test_forged_flash_cookie_is_ignored() {
    let app = create_test_app().await;
    app.server
        .post("/urls")
        .form(&[("url", "https://example.com")])
        .await;

    let page = app
        .server
        .get("/urls")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("flash=eyJ0ZXh0IjoiaGFja2VkIn0.deadbeef"),
        )
        .await;

    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(!page.text().contains("hacked"));
}

#[tokio::test]
async fn test_invalid_url_rerenders_form_with_422() {
    let app = create_test_app().await;

    let empty = app.server.post("/urls").form(&[("url", "   ")]).await;
    assert_eq!(empty.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(empty.text().matches("URL обязателен").count(), 1);

    let malformed = app.server.post("/urls").form(&[("url", "not a url")]).await;
    assert_eq!(malformed.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(malformed.text().contains("Некорректный URL"));
    assert!(malformed.text().contains("not a url"));

    let long = format!("https://example.com/{}", "a".repeat(300));
    let too_long = app.server.post("/urls").form(&[("url", long.as_str())]).await;
    assert_eq!(too_long.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(too_long.text().contains("URL превышает 255 символов"));

    let urls = UrlRepositoryImpl::new(app.db.clone());
    assert!(urls.list_with_latest_check().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_or_non_integer_id_is_404() {
    let app = create_test_app().await;

    assert_eq!(
        app.server.get("/urls/999").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.server.get("/urls/abc").await.status_code(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.server.post("/urls/999/checks").await.status_code(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_successful_check_is_recorded_and_listed() {
    let app = create_test_app().await;
    let site = start_target_site(StatusCode::OK, SAMPLE_PAGE).await;

    let created = app.server.post("/urls").form(&[("url", site.as_str())]).await;
    let location = created.header("location").to_str().unwrap().to_string();

    let checked = app.server.post(&format!("{}/checks", location)).await;
    assert_eq!(checked.status_code(), StatusCode::FOUND);
    assert_eq!(checked.header("location").to_str().unwrap(), location);
    let set_cookie = checked.header("set-cookie").to_str().unwrap().to_string();

    let page = app
        .server
        .get(&location)
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&cookie_pair(&set_cookie)).unwrap(),
        )
        .await;
    let body = page.text();
    assert!(body.contains("Страница успешно проверена"));
    assert!(body.contains("<td>Hi</td>"));
    assert!(body.contains("<td>Hello</td>"));
    assert!(body.contains("<td>D</td>"));

    let listing = app.server.get("/urls").await.text();
    assert!(listing.contains(site.trim_start_matches("http://")));
    assert!(listing.contains("<td>200</td>"));
}

#[tokio::test]
async fn test_failed_check_records_nothing() {
    let app = create_test_app().await;
    let site = start_target_site(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let created = app.server.post("/urls").form(&[("url", site.as_str())]).await;
    let location = created.header("location").to_str().unwrap().to_string();
    let url_id: i32 = location.trim_start_matches("/urls/").parse().unwrap();

    let checked = app.server.post(&format!("{}/checks", location)).await;
    assert_eq!(checked.status_code(), StatusCode::FOUND);
    let set_cookie = checked.header("set-cookie").to_str().unwrap().to_string();

    let page = app
        .server
        .get(&location)
        .add_header(
            header::COOKIE,
            HeaderValue::from_str(&cookie_pair(&set_cookie)).unwrap(),
        )
        .await;
    assert!(page.text().contains("Произошла ошибка при проверке"));

    let checks = UrlCheckRepositoryImpl::new(app.db.clone());
    assert!(checks.find_by_url_id(url_id).await.unwrap().is_empty());
}
