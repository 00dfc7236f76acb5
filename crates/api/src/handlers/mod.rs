pub mod auth;
pub mod categories;
pub mod collections;
pub mod ingredients;
pub mod recipe;
pub mod search;
pub mod tags;
