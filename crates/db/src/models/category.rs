//! Category entity model and DTOs.

use petshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::product::Product;

/// Name of the unique constraint on `categories.name`.
pub const UQ_CATEGORY_NAME: &str = "uq_categories_name";

/// A category row from the `categories` table.
///
/// `image_url` holds the stored path reference. Handlers replace it with the
/// inline image payload before responding.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A category with the number of products that reference it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    #[serde(rename = "total_produtos")]
    pub product_count: i64,
}

/// A category with all of its products inlined.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    #[serde(rename = "produtos")]
    pub products: Vec<Product>,
}

/// DTO for creating a new category. The image reference comes from the
/// upload, never from the client.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCategory {
    #[serde(rename = "nome")]
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}

/// DTO for updating an existing category. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
}
