//! HTTP handlers for articles (public reads and admin CRUD)

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::filter::{list_articles, related_articles, ArticleQuery};
use super::models::{Article, ArticleInput};
use crate::common::{ApiError, ApiResult, PaginatedResponse, SuccessResponse};
use crate::server::app::AppState;

pub async fn list_published_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ArticleQuery>,
) -> Json<PaginatedResponse<Article>> {
    Json(list_articles(state.articles.published().await, &query))
}

pub async fn get_by_slug_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Article>> {
    state
        .articles
        .find_published_by_slug(&slug)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Article"))
}

pub async fn related_handler(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Vec<Article>>> {
    let article = state
        .articles
        .find_published_by_slug(&slug)
        .await
        .ok_or_else(|| ApiError::not_found("Article"))?;

    Ok(Json(related_articles(&article, state.articles.published().await)))
}

pub async fn admin_list_handler(Extension(state): Extension<AppState>) -> Json<Vec<Article>> {
    Json(state.articles.list().await)
}

pub async fn admin_get_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Article>> {
    state
        .articles
        .get(id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Article"))
}

pub async fn create_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<ArticleInput>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    let article = state.articles.create(input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<ArticleInput>,
) -> ApiResult<Json<Article>> {
    Ok(Json(state.articles.update(id, input).await?))
}

pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    state.articles.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
