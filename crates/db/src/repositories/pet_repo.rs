//! Repository for the `pets` table.

use petshop_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::pet::{CreatePet, Pet, UpdatePet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, kind, breed, age, created_at, updated_at";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet, returning the created row.
    ///
    /// Callers validate `input` first; missing required fields are rejected
    /// by the `NOT NULL` constraints otherwise.
    pub async fn create(pool: &PgPool, input: &CreatePet) -> DbResult<Pet> {
        let query = format!(
            "INSERT INTO pets (name, kind, breed, age)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let pet = sqlx::query_as::<_, Pet>(&query)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.breed)
            .bind(input.age)
            .fetch_one(pool)
            .await?;
        Ok(pet)
    }

    /// Find a pet by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Pet>> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        let pet = sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(pet)
    }

    /// List all pets ordered by ID.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Pet>> {
        let query = format!("SELECT {COLUMNS} FROM pets ORDER BY id");
        let pets = sqlx::query_as::<_, Pet>(&query).fetch_all(pool).await?;
        Ok(pets)
    }

    /// Update a pet. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdatePet) -> DbResult<Option<Pet>> {
        let query = format!(
            "UPDATE pets SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                breed = COALESCE($4, breed),
                age = COALESCE($5, age),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let pet = sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.breed)
            .bind(input.age)
            .fetch_optional(pool)
            .await?;
        Ok(pet)
    }

    /// Delete a pet by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
