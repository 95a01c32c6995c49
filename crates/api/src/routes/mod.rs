pub mod category;
pub mod health;
pub mod pet;
pub mod product;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use serde_json::{json, Value};

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pets                                list, create
/// /pets/{id}                           get, update, delete
///
/// /categories                          list, create (json or multipart)
/// /categories/{id}                     get, update (json or multipart), delete
///
/// /products                            list, create (json or multipart)
/// /products/{id}                       get, update (json or multipart), delete
/// /products/categoria/{category_id}    list by category
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pets", pet::router())
        .nest("/categories", category::router())
        .nest("/products", product::router())
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found",
        })),
    )
}
