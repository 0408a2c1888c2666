use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::common::Ack;
use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{CreateExamRequest, GradeWritingRequest, SaveResultRequest, UpdateExamRequest};
use super::repo_types::{Exam, ExamResult};

pub fn exam_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/exams", get(list_exams))
        .route("/admin/create-exam", post(create_exam))
        .route("/admin/edit-exam/:id", put(edit_exam))
        .route("/admin/toggle-exam/:id", patch(toggle_exam))
        .route("/admin/delete-exam/:id", delete(delete_exam))
        .route("/admin/results", get(list_results))
        .route("/admin/save-result", post(save_result))
        .route("/admin/pending-writings", get(pending_writings))
        .route("/admin/grade-writing", post(grade_writing))
}

#[instrument(skip(state))]
pub async fn list_exams(State(state): State<AppState>) -> Result<Json<Vec<Exam>>, ApiError> {
    Ok(Json(Exam::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn create_exam(
    State(state): State<AppState>,
    Json(body): Json<CreateExamRequest>,
) -> Result<Json<Ack>, ApiError> {
    if body.exam_title.trim().is_empty() {
        return Err(ApiError::Validation("Exam title is required!".into()));
    }
    let exam = Exam::create(&state.db, body).await?;
    info!(exam_id = %exam.id, title = %exam.exam_title, "exam created");
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state, body))]
pub async fn edit_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateExamRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !Exam::update(&state.db, id, body).await? {
        return Err(ApiError::NotFound("Exam not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn toggle_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    if !Exam::toggle(&state.db, id).await? {
        return Err(ApiError::NotFound("Exam not found!".into()));
    }
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ack>, ApiError> {
    Exam::delete(&state.db, id).await?;
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamResult>>, ApiError> {
    Ok(Json(ExamResult::list(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn save_result(
    State(state): State<AppState>,
    Json(body): Json<SaveResultRequest>,
) -> Result<Json<Ack>, ApiError> {
    let result = ExamResult::create(&state.db, body).await?;
    info!(result_id = %result.id, exam = %result.exam_title, "result saved");
    Ok(Json(Ack::ok()))
}

#[instrument(skip(state))]
pub async fn pending_writings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExamResult>>, ApiError> {
    Ok(Json(ExamResult::pending_writings(&state.db).await?))
}

#[instrument(skip(state, body))]
pub async fn grade_writing(
    State(state): State<AppState>,
    Json(body): Json<GradeWritingRequest>,
) -> Result<Json<Ack>, ApiError> {
    if !ExamResult::grade(&state.db, body.result_id, body.score, &body.feedback).await? {
        return Err(ApiError::NotFound("Result not found!".into()));
    }
    info!(result_id = %body.result_id, score = body.score, "writing graded and published");
    Ok(Json(Ack::ok()))
}
