//! HTTP handlers for videos

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::models::{Video, VideoInput, VideoQuery};
use crate::common::{ApiResult, SuccessResponse};
use crate::server::app::AppState;

pub async fn list_published_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<VideoQuery>,
) -> Json<Vec<Video>> {
    Json(state.videos.published(query.category).await)
}

pub async fn admin_list_handler(Extension(state): Extension<AppState>) -> Json<Vec<Video>> {
    Json(state.videos.list().await)
}

pub async fn create_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<VideoInput>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let video = state.videos.create(input).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn update_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<VideoInput>,
) -> ApiResult<Json<Video>> {
    Ok(Json(state.videos.update(id, input).await?))
}

pub async fn delete_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    state.videos.delete(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
