//! services/api/src/web/questions.rs
//!
//! Axum handlers for `/api/questions`.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use prep_tracker_core::domain::RecordId;
use std::sync::Arc;

use crate::web::extract::{ApiJson, ApiPath};
use crate::web::protocol::{ErrorResponse, MessageResponse, QuestionPayload, QuestionResource};
use crate::web::rest::{port_failure, ApiFailure};
use crate::web::state::AppState;

/// List all questions, most recently created first.
#[utoipa::path(
    get,
    path = "/api/questions",
    tag = "questions",
    responses(
        (status = 200, description = "All questions", body = [QuestionResource]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_questions_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuestionResource>>, ApiFailure> {
    let questions = state.records.list_questions().await.map_err(port_failure)?;
    Ok(Json(questions.into_iter().map(QuestionResource::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "The question", body = QuestionResource),
        (status = 404, description = "Question not found", body = ErrorResponse)
    )
)]
pub async fn get_question_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<QuestionResource>, ApiFailure> {
    let question = state.records.get_question(id).await.map_err(port_failure)?;
    Ok(Json(question.into()))
}

/// Create a question. Only the title is required.
#[utoipa::path(
    post,
    path = "/api/questions",
    tag = "questions",
    request_body = QuestionPayload,
    responses(
        (status = 201, description = "Question created", body = QuestionResource),
        (status = 400, description = "Missing title or malformed field", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_question_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<QuestionPayload>,
) -> Result<impl IntoResponse, ApiFailure> {
    let draft = payload.into_draft().map_err(port_failure)?;
    let question = state
        .records
        .create_question(&draft)
        .await
        .map_err(port_failure)?;
    Ok((StatusCode::CREATED, Json(QuestionResource::from(question))))
}

/// Replace every editable field of a question.
#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question identifier")),
    request_body = QuestionPayload,
    responses(
        (status = 200, description = "Question updated", body = QuestionResource),
        (status = 400, description = "Missing title or malformed field", body = ErrorResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    )
)]
pub async fn update_question_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(payload): ApiJson<QuestionPayload>,
) -> Result<Json<QuestionResource>, ApiFailure> {
    let draft = payload.into_draft().map_err(port_failure)?;
    let question = state
        .records
        .update_question(id, &draft)
        .await
        .map_err(port_failure)?;
    Ok(Json(question.into()))
}

#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    tag = "questions",
    params(("id" = i64, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question deleted", body = MessageResponse),
        (status = 404, description = "Question not found", body = ErrorResponse)
    )
)]
pub async fn delete_question_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    state
        .records
        .delete_question(id)
        .await
        .map_err(port_failure)?;
    Ok(Json(MessageResponse {
        message: "Question deleted successfully".to_string(),
    }))
}
