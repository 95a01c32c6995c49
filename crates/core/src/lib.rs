//! Domain logic shared by the database and API crates.
//!
//! Nothing in here talks to the database or to HTTP directly: the modules
//! hold error types, identifier aliases, upload rules and the inline image
//! codec.

pub mod error;
pub mod image_data;
pub mod types;
pub mod upload;
