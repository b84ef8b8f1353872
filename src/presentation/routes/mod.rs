// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::reqwest_engine::ReqwestFetcher;
use crate::infrastructure::repositories::url_check_repo_impl::UrlCheckRepositoryImpl;
use crate::infrastructure::repositories::url_repo_impl::UrlRepositoryImpl;
use crate::presentation::errors::not_found_fallback;
use crate::presentation::flash::FlashSigner;
use crate::presentation::handlers::url_handler;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由，未匹配的路径渲染 404 页面
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let page_routes = Router::new()
        .route("/", get(url_handler::index))
        .route(
            "/urls",
            post(url_handler::create_url::<UrlRepositoryImpl, UrlCheckRepositoryImpl, ReqwestFetcher>)
                .get(url_handler::list_urls::<UrlRepositoryImpl, UrlCheckRepositoryImpl, ReqwestFetcher>),
        )
        .route(
            "/urls/{id}",
            get(url_handler::show_url::<UrlRepositoryImpl, UrlCheckRepositoryImpl, ReqwestFetcher>),
        )
        .route(
            "/urls/{id}/checks",
            post(
                url_handler::create_check::<
                    UrlRepositoryImpl,
                    UrlCheckRepositoryImpl,
                    ReqwestFetcher,
                >,
            ),
        );

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .fallback(not_found_fallback)
}

/// 组装完整的应用
///
/// 注入仓库、抓取器和闪现签名器，并开启请求追踪
pub fn build_app(
    db: Arc<DatabaseConnection>,
    fetcher: Arc<ReqwestFetcher>,
    signer: Arc<FlashSigner>,
) -> Router {
    let url_repo = Arc::new(UrlRepositoryImpl::new(db.clone()));
    let check_repo = Arc::new(UrlCheckRepositoryImpl::new(db));

    routes()
        .layer(Extension(url_repo))
        .layer(Extension(check_repo))
        .layer(Extension(fetcher))
        .layer(Extension(signer))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
