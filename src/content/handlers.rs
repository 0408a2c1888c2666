use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::common::Ack;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{
    CreateMaterialRequest, CreateNoticeRequest, CreateVideoRequest, UpdateMaterialRequest,
    UpdateVideoRequest,
};
use super::repo_types::{Material, Notice, Video};

pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/materials", get(list_materials))
        .route("/admin/add-material", post(add_material))
        .route("/admin/edit-material/:id", put(edit_material))
        .route("/admin/toggle-material/:id", patch(toggle_material))
        .route("/admin/delete-material/:id", delete(delete_material))
        .route("/admin/videos", get(list_videos))
        .route("/admin/add-video", post(add_video))
        .route("/admin/edit-video/:id", put(edit_video))
        .route("/admin/toggle-video/:id", patch(toggle_video))
        .route("/admin/delete-video/:id", delete(delete_video))
        .route("/admin/notices", get(list_notices))
        .route("/admin/add-notice", post(add_notice))
        .route("/admin/delete-notice/:id", delete(delete_notice))
}

// --- materials ---

#[instrument(skip(state))]
pub async fn list_materials(
    State(state): State<AppState>,
) -> Result<Json<Vec<Material>>, ApiError> {
    Ok(Json(Material::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn add_material(
    State(state): State<AppState>,
    Json(body): Json<CreateMaterialRequest>,
) -> Result<Json<Ack>, ApiError> {
    Material::create(&state.db, &body).await?;
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state, body))]
pub async fn edit_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMaterialRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !Material::update(&state.db, id, &body).await? {
        return Err(ApiError::NotFound("Material not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn toggle_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    if !Material::toggle(&state.db, id).await? {
        return Err(ApiError::NotFound("Material not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    Material::delete(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}

// --- videos ---

#[instrument(skip(state))]
pub async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<Video>>, ApiError> {
    Ok(Json(Video::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn add_video(
    State(state): State<AppState>,
    Json(body): Json<CreateVideoRequest>,
) -> Result<Json<Ack>, ApiError> {
    Video::create(&state.db, &body).await?;
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state, body))]
pub async fn edit_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateVideoRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !Video::update(&state.db, id, &body).await? {
        return Err(ApiError::NotFound("Video not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn toggle_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    if !Video::toggle(&state.db, id).await? {
        return Err(ApiError::NotFound("Video not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    Video::delete(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}

// --- notices ---

#[instrument(skip(state))]
pub async fn list_notices(State(state): State<AppState>) -> Result<Json<Vec<Notice>>, ApiError> {
    Ok(Json(Notice::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn add_notice(
    State(state): State<AppState>,
    Json(body): Json<CreateNoticeRequest>,
) -> Result<Json<Ack>, ApiError> {
    Notice::create(&state.db, &body).await?;
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    Notice::delete(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}
