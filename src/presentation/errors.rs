// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use crate::application::use_cases::url_use_case::UrlUseCaseError;
use crate::domain::repositories::url_repository::RepositoryError;
use crate::presentation::templates::{NotFoundTemplate, ServerErrorTemplate};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，渲染为 404 或 500 页面
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    pub fn not_found() -> Self {
        Self(UrlUseCaseError::NotFound.into())
    }

    fn status(&self) -> StatusCode {
        let not_found = matches!(
            self.0.downcast_ref::<UrlUseCaseError>(),
            Some(UrlUseCaseError::NotFound)
        ) || matches!(
            self.0.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::NotFound)
        );

        if not_found {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let rendered = if status == StatusCode::NOT_FOUND {
            info!(error = %self.0, "Resource not found");
            NotFoundTemplate { flash: None }.render()
        } else {
            error!(error = ?self.0, "Request failed");
            ServerErrorTemplate { flash: None }.render()
        };

        match rendered {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to render error page");
                (status, status.canonical_reason().unwrap_or_default()).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 未匹配任何路由时的处理器
pub async fn not_found_fallback() -> AppError {
    AppError::not_found()
}
