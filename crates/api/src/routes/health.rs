use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    pub message: &'static str,
    /// RFC 3339 time the check ran.
    pub timestamp: String,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = petshop_db::health_check(&state.pool).await.is_ok();

    let (status, message) = if db_healthy {
        ("OK", "Pets, categories and products API is running")
    } else {
        ("degraded", "API is running but the database is unreachable")
    };

    Json(HealthResponse {
        status,
        message,
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET / -- welcome message with the endpoint index.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the pets, categories and products API",
        "endpoints": {
            "health": "/health",
            "pets": "/api/pets",
            "categories": "/api/categories",
            "products": "/api/products",
        },
    }))
}

/// Mount health and index routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
