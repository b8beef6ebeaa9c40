//! Row structs and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and updates

pub mod blog;
pub mod category;
pub mod comment;
pub mod owner_visit;
pub mod user;
pub mod visit;
