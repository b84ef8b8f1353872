// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{http::StatusCode, response::Html, routing::get, Router};
use axum_test::TestServer;
use migration::{Migrator, MigratorTrait};
use page_analyzer::config::settings::{DatabaseSettings, FetcherSettings};
use page_analyzer::engines::reqwest_engine::ReqwestFetcher;
use page_analyzer::infrastructure::database::connection;
use page_analyzer::presentation::flash::FlashSigner;
use page_analyzer::presentation::routes;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const TEST_SECRET: &str = "integration-test-secret";

pub const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Hi</title><meta name="description" content="D"></head>
<body><h1>Hello</h1><h1>Second</h1></body></html>"#;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
}

/// 创建已迁移的内存 SQLite 数据库
///
/// 连接池只有一个连接，保证所有查询看到同一个内存库
pub async fn create_test_db() -> Arc<DatabaseConnection> {
    let mut settings = DatabaseSettings::with_url("sqlite::memory:");
    settings.max_connections = Some(1);
    settings.min_connections = Some(1);

    let db = connection::connect_with_retry(&settings).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

pub async fn create_test_app() -> TestApp {
    let db = create_test_db().await;
    let fetcher = Arc::new(ReqwestFetcher::new(&FetcherSettings::default()).unwrap());
    let signer = Arc::new(FlashSigner::new(TEST_SECRET).unwrap());

    let app = routes::build_app(db.clone(), fetcher, signer);
    let server = TestServer::new(app).unwrap();

    TestApp { server, db }
}

/// 启动一个在 `/` 返回固定状态码和正文的目标站点
///
/// 返回 `http://127.0.0.1:{port}`
pub async fn start_target_site(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/", get(move || async move { (status, Html(body)) }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// 从 `Set-Cookie` 值中取出 `name=value` 部分
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}
