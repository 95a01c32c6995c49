use std::sync::Arc;

use crate::upload::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` and read-only afterwards. Cheaply cloneable (inner
/// data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: petshop_db::DbPool,
    /// Upload directories and the inline image codec.
    pub uploads: Arc<UploadStore>,
}
