//! Pet entity model and DTOs.

use petshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lenient;

/// A pet row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new pet. `name` and `kind` are required.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePet {
    #[serde(rename = "nome")]
    #[validate(
        required(message = "Name and kind are required"),
        length(min = 1, message = "Name and kind are required")
    )]
    pub name: Option<String>,
    #[serde(rename = "tipo")]
    #[validate(
        required(message = "Name and kind are required"),
        length(min = 1, message = "Name and kind are required")
    )]
    pub kind: Option<String>,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "idade", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0, message = "Age must be zero or greater"))]
    pub age: Option<i32>,
}

/// DTO for updating an existing pet. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePet {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[serde(rename = "tipo")]
    #[validate(length(min = 1, message = "Kind must not be empty"))]
    pub kind: Option<String>,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "idade", default, deserialize_with = "lenient::optional_number")]
    #[validate(range(min = 0, message = "Age must be zero or greater"))]
    pub age: Option<i32>,
}
