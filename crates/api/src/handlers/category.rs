//! Handlers for the `/categories` resource.
//!
//! Categories carry an optional image. Create and update accept either JSON
//! or a multipart form with an `imagem` file; every response replaces the
//! stored path reference with the inline image payload.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use petshop_core::error::CoreError;
use petshop_core::types::DbId;
use petshop_db::error::DbError;
use petshop_db::models::category::{
    Category, CategoryDetail, CategoryWithCount, CreateCategory, UpdateCategory, UQ_CATEGORY_NAME,
};
use petshop_db::repositories::{CategoryRepo, ProductRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;
use crate::upload::ImageForm;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ENTITY: &str = "Category";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    })
}

/// Report a duplicate name with a specific message; pass everything else on.
fn name_conflict(err: DbError) -> AppError {
    if err.is_unique_violation_of(UQ_CATEGORY_NAME) {
        AppError::Core(CoreError::Conflict(
            "A category with this name already exists".into(),
        ))
    } else {
        err.into()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/categories
///
/// Each category carries `total_produtos`; the products themselves are not
/// inlined.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ListResponse<CategoryWithCount>>> {
    let mut categories = CategoryRepo::list_with_counts(&state.pool).await?;
    for row in &mut categories {
        state.uploads.inline(&mut row.category.image_url).await?;
    }
    Ok(Json(ListResponse::new(categories)))
}

/// GET /api/categories/{id}
///
/// Inlines every product of the category under `produtos`.
pub async fn get_by_id(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<DataResponse<CategoryDetail>>> {
    let id = id.parse(ENTITY)?;
    let mut category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let mut products = ProductRepo::list_by_category(&state.pool, id).await?;

    state.uploads.inline(&mut category.image_url).await?;
    for product in &mut products {
        state.uploads.inline(&mut product.image_url).await?;
    }

    Ok(Json(DataResponse::new(CategoryDetail { category, products })))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    ImageForm { fields: input, image }: ImageForm<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate().map_err(CoreError::from)?;

    let image_url = state.uploads.save_if_present(image.as_ref()).await?;
    let mut category = match CategoryRepo::create(&state.pool, &input, image_url.as_deref()).await
    {
        Ok(category) => category,
        Err(err) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(name_conflict(err));
        }
    };

    state.uploads.inline(&mut category.image_url).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(
            "Category created successfully",
            category,
        )),
    ))
}

/// PUT /api/categories/{id}
///
/// The stored image is replaced only when a new file is uploaded. A missing
/// category is reported before any problem with the submitted fields.
pub async fn update(
    State(state): State<AppState>,
    id: PathId,
    ImageForm { fields: input, image }: ImageForm<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let id = id.parse(ENTITY)?;
    if !CategoryRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    input.validate().map_err(CoreError::from)?;

    let image_url = state.uploads.save_if_present(image.as_ref()).await?;
    let updated = CategoryRepo::update(&state.pool, id, &input, image_url.as_deref()).await;
    let mut category = match updated {
        Ok(Some(category)) => category,
        Ok(None) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(not_found(id));
        }
        Err(err) => {
            state.uploads.discard(image_url.as_deref()).await;
            return Err(name_conflict(err));
        }
    };

    state.uploads.inline(&mut category.image_url).await?;
    Ok(Json(DataResponse::with_message(
        "Category updated successfully",
        category,
    )))
}

/// DELETE /api/categories/{id}
///
/// Products of the category are removed by the database cascade.
pub async fn delete(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<MessageResponse>> {
    let id = id.parse(ENTITY)?;
    if CategoryRepo::delete(&state.pool, id).await? {
        Ok(Json(MessageResponse::new("Category deleted successfully")))
    } else {
        Err(not_found(id))
    }
}
