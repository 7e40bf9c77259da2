//! services/api/src/web/rest.rs
//!
//! Contains the master definition for the OpenAPI specification and the mapping
//! from port errors to HTTP responses shared by every REST handler.

use axum::{http::StatusCode, Json};
use prep_tracker_core::ports::PortError;
use tracing::error;
use utoipa::OpenApi;

use crate::web::protocol::{
    CodeSnippetPayload, CodeSnippetResource, ErrorResponse, MessageResponse, QuestionPayload,
    QuestionResource,
};
use crate::web::{questions, snippets};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        questions::list_questions_handler,
        questions::get_question_handler,
        questions::create_question_handler,
        questions::update_question_handler,
        questions::delete_question_handler,
        snippets::list_code_snippets_handler,
        snippets::get_code_snippet_handler,
        snippets::create_code_snippet_handler,
        snippets::update_code_snippet_handler,
        snippets::delete_code_snippet_handler,
    ),
    components(
        schemas(
            QuestionResource,
            QuestionPayload,
            CodeSnippetResource,
            CodeSnippetPayload,
            ErrorResponse,
            MessageResponse
        )
    ),
    tags(
        (name = "questions", description = "Interview questions and their solutions."),
        (name = "code-snippets", description = "Condensed reference implementations.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Responses
//=========================================================================================

/// The error half of every handler's result.
pub type ApiFailure = (StatusCode, Json<ErrorResponse>);

pub fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Maps a port error to its HTTP response. Store failures are logged and hidden from the caller.
pub fn port_failure(err: PortError) -> ApiFailure {
    match err {
        PortError::Validation(message) => failure(StatusCode::BAD_REQUEST, message),
        PortError::NotFound(message) => failure(StatusCode::NOT_FOUND, message),
        other => {
            error!("Record service failure: {}", other);
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
