pub mod extract;
pub mod middleware;
pub mod protocol;
pub mod questions;
pub mod rest;
pub mod snippets;
pub mod state;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::rest::ApiDoc;
use crate::web::state::AppState;

/// The `/api` routes with request logging, bound to the shared state.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/questions",
            get(questions::list_questions_handler).post(questions::create_question_handler),
        )
        .route(
            "/api/questions/{id}",
            get(questions::get_question_handler)
                .put(questions::update_question_handler)
                .delete(questions::delete_question_handler),
        )
        .route(
            "/api/code-snippets",
            get(snippets::list_code_snippets_handler).post(snippets::create_code_snippet_handler),
        )
        .route(
            "/api/code-snippets/{id}",
            get(snippets::get_code_snippet_handler)
                .put(snippets::update_code_snippet_handler)
                .delete(snippets::delete_code_snippet_handler),
        )
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// The complete application: API, Swagger UI, and static files for everything else.
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    Router::new()
        .merge(api_router(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}
