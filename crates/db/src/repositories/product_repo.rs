//! Repository for the `products` table.

use petshop_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::product::{
    CreateProduct, Product, ProductDetail, ProductWithCategory, UpdateProduct,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, image_url, category_id, created_at, updated_at";

/// Same columns qualified with the `p` alias, for joins against `categories c`.
const JOINED_COLUMNS: &str =
    "p.id, p.name, p.description, p.image_url, p.category_id, p.created_at, p.updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// A `category_id` that does not exist surfaces as
    /// [`DbError::ForeignKeyViolation`](crate::error::DbError::ForeignKeyViolation).
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
        image_url: Option<&str>,
    ) -> DbResult<Product> {
        let query = format!(
            "INSERT INTO products (name, description, image_url, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(image_url)
            .bind(input.category_id)
            .fetch_one(pool)
            .await?;
        Ok(product)
    }

    /// Find a product by its ID, without the category join.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> DbResult<Option<Product>> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(product)
    }

    /// Find a product by ID joined with its category's name and description.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> DbResult<Option<ProductDetail>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS},
                    c.name AS category_name, c.description AS category_description
             FROM products p
             INNER JOIN categories c ON c.id = p.category_id
             WHERE p.id = $1"
        );
        let product = sqlx::query_as::<_, ProductDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(product)
    }

    /// List all products ordered by ID, each with its category's name.
    pub async fn list_with_category(pool: &PgPool) -> DbResult<Vec<ProductWithCategory>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, c.name AS category_name
             FROM products p
             INNER JOIN categories c ON c.id = p.category_id
             ORDER BY p.id"
        );
        let products = sqlx::query_as::<_, ProductWithCategory>(&query)
            .fetch_all(pool)
            .await?;
        Ok(products)
    }

    /// List the products of one category ordered by ID, with the category name.
    pub async fn list_with_category_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> DbResult<Vec<ProductWithCategory>> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}, c.name AS category_name
             FROM products p
             INNER JOIN categories c ON c.id = p.category_id
             WHERE p.category_id = $1
             ORDER BY p.id"
        );
        let products = sqlx::query_as::<_, ProductWithCategory>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await?;
        Ok(products)
    }

    /// List the bare product rows of one category ordered by ID.
    pub async fn list_by_category(pool: &PgPool, category_id: DbId) -> DbResult<Vec<Product>> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE category_id = $1 ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await?;
        Ok(products)
    }

    /// Update a product. Only non-`None` fields are applied; `image_url`
    /// is replaced only when a new upload was stored.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
        image_url: Option<&str>,
    ) -> DbResult<Option<Product>> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category_id = COALESCE($4, category_id),
                image_url = COALESCE($5, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await?;
        Ok(product)
    }

    /// Delete a product by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
