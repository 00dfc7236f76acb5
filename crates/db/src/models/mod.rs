//! Row models and request DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where the
//!   entity is mutable

pub mod category;
pub mod collection;
pub mod ingredient;
pub mod recipe;
pub mod search;
pub mod tag;
pub mod user;
