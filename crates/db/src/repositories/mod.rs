//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.
//!
//! Updates and deletes are single statements: "no row affected" is the
//! not-found signal, so the existence check and the write cannot race.

pub mod category_repo;
pub mod pet_repo;
pub mod product_repo;

pub use category_repo::CategoryRepo;
pub use pet_repo::PetRepo;
pub use product_repo::ProductRepo;
