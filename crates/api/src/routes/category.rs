//! Route definitions for the `/categories` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;
use crate::upload::UPLOAD_BODY_LIMIT;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create      (json or multipart with `imagem`)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update      (json or multipart with `imagem`)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
