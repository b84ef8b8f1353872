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

use askama::Template;
use axum::{
    extract::{Extension, Form, Path},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    application::{
        dto::url_form::UrlFormDto,
        use_cases::url_use_case::{AddUrlOutcome, CheckStatus, UrlUseCase, UrlUseCaseError},
    },
    domain::repositories::{
        url_check_repository::UrlCheckRepository, url_repository::UrlRepository,
    },
    engines::traits::PageFetcher,
    presentation::{
        errors::AppError,
        flash::{FlashCategory, FlashMessage, FlashSigner},
        templates::{FlashView, IndexTemplate, UrlTemplate, UrlsTemplate},
    },
};

const MSG_ADDED: &str = "Страница успешно добавлена";
const MSG_EXISTS: &str = "Страница уже существует";
const MSG_CHECKED: &str = "Страница успешно проверена";
const MSG_CHECK_FAILED: &str = "Произошла ошибка при проверке";

/// 渲染页面，并清除已被读取的闪现 Cookie
fn render_page<T: Template>(
    status: StatusCode,
    template: &T,
    request_headers: &HeaderMap,
) -> Result<Response, AppError> {
    let body = template.render()?;
    let mut response = (status, Html(body)).into_response();

    if FlashSigner::has_cookie(request_headers) {
        response.headers_mut().append(
            header::SET_COOKIE,
            HeaderValue::from_str(&FlashSigner::clear_cookie())?,
        );
    }

    Ok(response)
}

/// `302 Found` 重定向并携带一条闪现消息
fn redirect_with_flash(
    location: &str,
    message: FlashMessage,
    signer: &FlashSigner,
) -> Result<Response, AppError> {
    let cookie = signer.set_cookie(&message)?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, HeaderValue::from_str(location)?),
            (header::SET_COOKIE, HeaderValue::from_str(&cookie)?),
        ],
    )
        .into_response())
}

/// 非整数的站点ID按不存在处理
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>().map_err(|_| AppError::not_found())
}

fn take_flash(signer: &FlashSigner, headers: &HeaderMap) -> Option<FlashView> {
    signer.read(headers).map(Into::into)
}

/// 首页：提交表单
pub async fn index(
    Extension(signer): Extension<Arc<FlashSigner>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let template = IndexTemplate {
        flash: take_flash(&signer, &headers),
        url_value: String::new(),
        error: None,
    };
    render_page(StatusCode::OK, &template, &headers)
}

/// 提交站点
pub async fn create_url<UR, CR, F>(
    Extension(url_repo): Extension<Arc<UR>>,
    Extension(check_repo): Extension<Arc<CR>>,
    Extension(fetcher): Extension<Arc<F>>,
    Extension(signer): Extension<Arc<FlashSigner>>,
    headers: HeaderMap,
    Form(form): Form<UrlFormDto>,
) -> Result<Response, AppError>
where
    UR: UrlRepository + 'static,
    CR: UrlCheckRepository + 'static,
    F: PageFetcher + 'static,
{
    let use_case = UrlUseCase::new(url_repo, check_repo, fetcher);

    match use_case.add_url(&form.url).await {
        Ok(outcome) => {
            let message = match outcome {
                AddUrlOutcome::Added(_) => FlashMessage::new(FlashCategory::Success, MSG_ADDED),
                AddUrlOutcome::AlreadyExists(_) => FlashMessage::new(FlashCategory::Info, MSG_EXISTS),
            };
            redirect_with_flash(&format!("/urls/{}", outcome.id()), message, &signer)
        }
        Err(UrlUseCaseError::Validation(e)) => {
            let template = IndexTemplate {
                flash: take_flash(&signer, &headers),
                url_value: form.url,
                error: Some(e.user_message().to_string()),
            };
            render_page(StatusCode::UNPROCESSABLE_ENTITY, &template, &headers)
        }
        Err(e) => Err(e.into()),
    }
}

/// 站点列表
pub async fn list_urls<UR, CR, F>(
    Extension(url_repo): Extension<Arc<UR>>,
    Extension(check_repo): Extension<Arc<CR>>,
    Extension(fetcher): Extension<Arc<F>>,
    Extension(signer): Extension<Arc<FlashSigner>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    UR: UrlRepository + 'static,
    CR: UrlCheckRepository + 'static,
    F: PageFetcher + 'static,
{
    let use_case = UrlUseCase::new(url_repo, check_repo, fetcher);
    let urls = use_case.list_urls().await?;

    let template = UrlsTemplate {
        flash: take_flash(&signer, &headers),
        rows: urls.into_iter().map(Into::into).collect(),
    };
    render_page(StatusCode::OK, &template, &headers)
}

/// 站点详情及检查历史
pub async fn show_url<UR, CR, F>(
    Extension(url_repo): Extension<Arc<UR>>,
    Extension(check_repo): Extension<Arc<CR>>,
    Extension(fetcher): Extension<Arc<F>>,
    Extension(signer): Extension<Arc<FlashSigner>>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    UR: UrlRepository + 'static,
    CR: UrlCheckRepository + 'static,
    F: PageFetcher + 'static,
{
    let id = parse_id(&raw_id)?;
    let use_case = UrlUseCase::new(url_repo, check_repo, fetcher);
    let (url, checks) = use_case.show_url(id).await?;

    let template = UrlTemplate::new(take_flash(&signer, &headers), url, checks);
    render_page(StatusCode::OK, &template, &headers)
}

/// 对站点执行一次检查
pub async fn create_check<UR, CR, F>(
    Extension(url_repo): Extension<Arc<UR>>,
    Extension(check_repo): Extension<Arc<CR>>,
    Extension(fetcher): Extension<Arc<F>>,
    Extension(signer): Extension<Arc<FlashSigner>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError>
where
    UR: UrlRepository + 'static,
    CR: UrlCheckRepository + 'static,
    F: PageFetcher + 'static,
{
    let id = parse_id(&raw_id)?;
    let use_case = UrlUseCase::new(url_repo, check_repo, fetcher);
    let outcome = use_case.run_check(id).await?;

    let message = match outcome.status {
        CheckStatus::Checked(_) => FlashMessage::new(FlashCategory::Success, MSG_CHECKED),
        CheckStatus::Failed(_) => FlashMessage::new(FlashCategory::Danger, MSG_CHECK_FAILED),
    };
    redirect_with_flash(&format!("/urls/{}", outcome.url.id), message, &signer)
}
