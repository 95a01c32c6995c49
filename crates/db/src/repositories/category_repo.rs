//! Repository for the `categories` table.

use petshop_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, image_url, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    ///
    /// A duplicate name surfaces as [`DbError::UniqueViolation`] on
    /// [`UQ_CATEGORY_NAME`](crate::models::category::UQ_CATEGORY_NAME).
    ///
    /// [`DbError::UniqueViolation`]: crate::error::DbError::UniqueViolation
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategory,
        image_url: Option<&str>,
    ) -> DbResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, description, image_url)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(image_url)
            .fetch_one(pool)
            .await?;
        Ok(category)
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Category>> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// Whether a category with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List all categories ordered by ID, each with its product count.
    pub async fn list_with_counts(pool: &PgPool) -> DbResult<Vec<CategoryWithCount>> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.description, c.image_url, c.created_at, c.updated_at,
                    COUNT(p.id) AS product_count
             FROM categories c
             LEFT JOIN products p ON p.category_id = c.id
             GROUP BY c.id
             ORDER BY c.id",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    /// Update a category. Only non-`None` fields are applied; `image_url`
    /// is replaced only when a new upload was stored.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
        image_url: Option<&str>,
    ) -> DbResult<Option<Category>> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(image_url)
            .fetch_optional(pool)
            .await?;
        Ok(category)
    }

    /// Delete a category by ID. Its products are removed by the
    /// `ON DELETE CASCADE` foreign key. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
