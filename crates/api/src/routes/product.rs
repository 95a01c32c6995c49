//! Route definitions for the `/products` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;
use crate::upload::UPLOAD_BODY_LIMIT;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create            (json or multipart with `imagem`)
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update            (json or multipart with `imagem`)
/// DELETE /{id}                      -> delete
/// GET    /categoria/{category_id}   -> list_by_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::create))
        .route(
            "/{id}",
            get(product::get_by_id)
                .put(product::update)
                .delete(product::delete),
        )
        .route("/categoria/{category_id}", get(product::list_by_category))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}
