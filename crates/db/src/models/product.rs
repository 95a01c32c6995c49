//! Product entity model and DTOs.

use petshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lenient;

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "imagem_url")]
    pub image_url: Option<String>,
    #[serde(rename = "categoria_id")]
    pub category_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A product joined with its category's name (list views).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "categoria_nome")]
    pub category_name: String,
}

/// A product joined with its category's name and description (detail view).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "categoria_nome")]
    pub category_name: String,
    #[serde(rename = "categoria_descricao")]
    pub category_description: Option<String>,
}

/// DTO for creating a new product. `name` and `category_id` are required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProduct {
    #[serde(rename = "nome")]
    #[validate(
        required(message = "Name and category are required"),
        length(min = 1, message = "Name and category are required")
    )]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "categoria_id", default, deserialize_with = "lenient::optional_number")]
    #[validate(required(message = "Name and category are required"))]
    pub category_id: Option<DbId>,
}

/// DTO for updating an existing product. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProduct {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "categoria_id", default, deserialize_with = "lenient::optional_number")]
    pub category_id: Option<DbId>,
}
