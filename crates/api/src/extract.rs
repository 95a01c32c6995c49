//! Extractors whose rejections use the JSON error body.
//!
//! Axum's stock `Json` and `Path` extractors reject with plain-text bodies
//! and assorted status codes. These wrappers route every rejection through
//! [`AppError`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use petshop_core::error::CoreError;
use petshop_core::types::{self, DbId};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Missing content type, malformed JSON and fields of the
/// wrong type are all reported as 400.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// The `{id}` segment of the path, unparsed.
///
/// Parsing is left to the handler so that an id which is not a number can be
/// reported as a missing row of the right entity.
pub struct PathId(pub String);

impl PathId {
    pub fn parse(&self, entity: &'static str) -> Result<DbId, CoreError> {
        types::parse_id(entity, &self.0)
    }
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(raw))
    }
}

fn path_rejection(rejection: PathRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}
