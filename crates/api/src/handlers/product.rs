//! Handlers for the `/products` resource.
//!
//! Every product belongs to a category. The category is looked up before
//! each write that names one; the foreign key catches a category deleted in
//! between, and both cases produce the same 400 response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use petshop_core::error::CoreError;
use petshop_core::types::DbId;
use petshop_db::error::DbError;
use petshop_db::models::product::{
    CreateProduct, Product, ProductDetail, ProductWithCategory, UpdateProduct,
};
use petshop_db::repositories::{CategoryRepo, ProductRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;
use crate::upload::ImageForm;

const ENTITY: &str = "Product";

const CATEGORY_NOT_FOUND: &str = "Category not found";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    })
}

/// Reject a write that names a category which does not exist.
async fn ensure_category_exists(pool: &PgPool, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::exists(pool, category_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(
            CATEGORY_NOT_FOUND.into(),
        )))
    }
}

/// Map a foreign key violation (category deleted after the check) to the
/// same response as a failed check.
fn category_reference(err: DbError) -> AppError {
    match err {
        DbError::ForeignKeyViolation { .. } => {
            AppError::Core(CoreError::Validation(CATEGORY_NOT_FOUND.into()))
        }
        other => other.into(),
    }
}

async fn inline_rows(state: &AppState, rows: &mut [ProductWithCategory]) -> AppResult<()> {
    for row in rows {
        state.uploads.inline(&mut row.product.image_url).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<ProductWithCategory>>> {
    let mut products = ProductRepo::list_with_category(&state.pool).await?;
    inline_rows(&state, &mut products).await?;
    Ok(Json(ListResponse::new(products)))
}

/// GET /api/products/categoria/{category_id}
pub async fn list_by_category(
    State(state): State<AppState>,
    category_id: PathId,
) -> AppResult<Json<ListResponse<ProductWithCategory>>> {
    let category_id = category_id.parse("Category")?;
    let mut products =
        ProductRepo::list_with_category_by_category(&state.pool, category_id).await?;
    inline_rows(&state, &mut products).await?;
    Ok(Json(ListResponse::new(products)))
}

/// GET /api/products/{id}
///
/// Inlines the owning category's name and description.
pub async fn get_by_id(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<DataResponse<ProductDetail>>> {
    let id = id.parse(ENTITY)?;
    let mut product = ProductRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    state.uploads.inline(&mut product.product.image_url).await?;
    Ok(Json(DataResponse::new(product)))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    ImageForm { fields: input, image }: ImageForm<CreateProduct>,
) -> AppResult<(StatusCode, Json<DataResponse<Product>>)> {
    input.validate().map_err(CoreError::from)?;
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }

    let image_url = state.uploads.save_if_present(image.as_ref()).await?;
    let mut product = match ProductRepo::create(&state.pool, &input, image_url.as_deref()).await {
        Ok(product) => product,
        Err(err) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(category_reference(err));
        }
    };

    state.uploads.inline(&mut product.image_url).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "Product created successfully",
            product,
        )),
    ))
}

/// PUT /api/products/{id}
///
/// A missing product is reported first. A supplied `categoria_id` is then
/// re-validated. The stored image is replaced only when a new file is
/// uploaded.
pub async fn update(
    State(state): State<AppState>,
    id: PathId,
    ImageForm { fields: input, image }: ImageForm<UpdateProduct>,
) -> AppResult<Json<DataResponse<Product>>> {
    let id = id.parse(ENTITY)?;
    if ProductRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    input.validate().map_err(CoreError::from)?;
    if let Some(category_id) = input.category_id {
        ensure_category_exists(&state.pool, category_id).await?;
    }

    let image_url = state.uploads.save_if_present(image.as_ref()).await?;
    let updated = ProductRepo::update(&state.pool, id, &input, image_url.as_deref()).await;
    let mut product = match updated {
        Ok(Some(product)) => product,
        Ok(None) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(not_found(id));
        }
        Err(err) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(category_reference(err));
        }
    };

    state.uploads.inline(&mut product.image_url).await?;
    Ok(Json(DataResponse::with_message(
        "Product updated successfully",
        product,
    )))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<MessageResponse>> {
    let id = id.parse(ENTITY)?;
    if ProductRepo::delete(&state.pool, id).await? {
        Ok(Json(MessageResponse::new("Product deleted successfully")))
    } else {
        Err(not_found(id))
    }
}
