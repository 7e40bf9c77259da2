//! services/api/src/web/snippets.rs
//!
//! Axum handlers for `/api/code-snippets`.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use prep_tracker_core::domain::RecordId;
use std::sync::Arc;

use crate::web::extract::{ApiJson, ApiPath};
use crate::web::protocol::{
    CodeSnippetPayload, CodeSnippetResource, ErrorResponse, MessageResponse,
};
use crate::web::rest::{port_failure, ApiFailure};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/code-snippets",
    tag = "code-snippets",
    responses(
        (status = 200, description = "All code snippets", body = [CodeSnippetResource]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_code_snippets_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CodeSnippetResource>>, ApiFailure> {
    let snippets = state
        .records
        .list_code_snippets()
        .await
        .map_err(port_failure)?;
    Ok(Json(snippets.into_iter().map(CodeSnippetResource::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/code-snippets/{id}",
    tag = "code-snippets",
    params(("id" = i64, Path, description = "Snippet identifier")),
    responses(
        (status = 200, description = "The code snippet", body = CodeSnippetResource),
        (status = 404, description = "Code snippet not found", body = ErrorResponse)
    )
)]
pub async fn get_code_snippet_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<CodeSnippetResource>, ApiFailure> {
    let snippet = state
        .records
        .get_code_snippet(id)
        .await
        .map_err(port_failure)?;
    Ok(Json(snippet.into()))
}

/// Create a snippet. Title, language, category and condensed code are required.
#[utoipa::path(
    post,
    path = "/api/code-snippets",
    tag = "code-snippets",
    request_body = CodeSnippetPayload,
    responses(
        (status = 201, description = "Code snippet created", body = CodeSnippetResource),
        (status = 400, description = "A required field is missing", body = ErrorResponse)
    )
)]
pub async fn create_code_snippet_handler(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CodeSnippetPayload>,
) -> Result<impl IntoResponse, ApiFailure> {
    let snippet = state
        .records
        .create_code_snippet(&payload.into_draft())
        .await
        .map_err(port_failure)?;
    Ok((StatusCode::CREATED, Json(CodeSnippetResource::from(snippet))))
}

#[utoipa::path(
    put,
    path = "/api/code-snippets/{id}",
    tag = "code-snippets",
    params(("id" = i64, Path, description = "Snippet identifier")),
    request_body = CodeSnippetPayload,
    responses(
        (status = 200, description = "Code snippet updated", body = CodeSnippetResource),
        (status = 400, description = "A required field is missing", body = ErrorResponse),
        (status = 404, description = "Code snippet not found", body = ErrorResponse)
    )
)]
pub async fn update_code_snippet_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
    ApiJson(payload): ApiJson<CodeSnippetPayload>,
) -> Result<Json<CodeSnippetResource>, ApiFailure> {
    let snippet = state
        .records
        .update_code_snippet(id, &payload.into_draft())
        .await
        .map_err(port_failure)?;
    Ok(Json(snippet.into()))
}

#[utoipa::path(
    delete,
    path = "/api/code-snippets/{id}",
    tag = "code-snippets",
    params(("id" = i64, Path, description = "Snippet identifier")),
    responses(
        (status = 200, description = "Code snippet deleted", body = MessageResponse),
        (status = 404, description = "Code snippet not found", body = ErrorResponse)
    )
)]
pub async fn delete_code_snippet_handler(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<RecordId>,
) -> Result<Json<MessageResponse>, ApiFailure> {
    state
        .records
        .delete_code_snippet(id)
        .await
        .map_err(port_failure)?;
    Ok(Json(MessageResponse {
        message: "Code snippet deleted successfully".to_string(),
    }))
}
