//! Pure domain logic for the recipe service.
//!
//! Nothing in this crate performs I/O. The repository layer (`recipebox-db`)
//! and the HTTP layer (`recipebox-api`) both build on these types.

pub mod error;
pub mod recipe;
pub mod recipe_query;
pub mod search;
pub mod tag;
pub mod types;
