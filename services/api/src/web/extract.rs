//! services/api/src/web/extract.rs
//!
//! Request extractors whose rejections use the API's `{ "error": ... }` body.
//! A malformed body or path parameter is a client error, always answered with 400.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::web::rest::{failure, ApiFailure};

/// A JSON body. Rejections become `400 { "error": ... }`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejected request body: {}", rejection.body_text());
            failure(StatusCode::BAD_REQUEST, rejection.body_text())
        })?;
        Ok(Self(value))
    }
}

/// A path parameter. Rejections become `400 { "error": ... }`.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| failure(StatusCode::BAD_REQUEST, rejection.body_text()))?;
        Ok(Self(value))
    }
}
