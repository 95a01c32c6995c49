//! Request handlers for the pet, category and product resources.
//!
//! Each submodule provides async handler functions (list, get_by_id, create,
//! update, delete) for a single entity type. Handlers delegate to the
//! corresponding repository in `petshop_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod category;
pub mod pet;
pub mod product;
