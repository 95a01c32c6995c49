//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Rust field names follow the database columns; the JSON names follow the
//! public API contract (`nome`, `descricao`, `imagem_url`, ...).

pub mod category;
pub mod lenient;
pub mod pet;
pub mod product;
