//! Handlers for the `/pets` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use petshop_core::error::CoreError;
use petshop_core::types::DbId;
use petshop_db::models::pet::{CreatePet, Pet, UpdatePet};
use petshop_db::repositories::PetRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::response::{DataResponse, ListResponse, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Pet";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY,
        id: id.to_string(),
    })
}

/// GET /api/pets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ListResponse<Pet>>> {
    let pets = PetRepo::list(&state.pool).await?;
    Ok(Json(ListResponse::new(pets)))
}

/// GET /api/pets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<DataResponse<Pet>>> {
    let id = id.parse(ENTITY)?;
    let pet = PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::new(pet)))
}

/// POST /api/pets
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreatePet>,
) -> AppResult<(StatusCode, Json<DataResponse<Pet>>)> {
    input.validate().map_err(CoreError::from)?;

    let pet = PetRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Pet created successfully", pet)),
    ))
}

/// PUT /api/pets/{id}
///
/// A missing pet is reported before any problem with the body.
pub async fn update(
    State(state): State<AppState>,
    id: PathId,
    JsonBody(input): JsonBody<UpdatePet>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let id = id.parse(ENTITY)?;
    if PetRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(not_found(id));
    }
    input.validate().map_err(CoreError::from)?;

    let pet = PetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse::with_message("Pet updated successfully", pet)))
}

/// DELETE /api/pets/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: PathId,
) -> AppResult<Json<MessageResponse>> {
    let id = id.parse(ENTITY)?;
    if PetRepo::delete(&state.pool, id).await? {
        Ok(Json(MessageResponse::new("Pet deleted successfully")))
    } else {
        Err(not_found(id))
    }
}
