//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a transaction) as the first argument.

pub mod category_repo;
pub mod collection_repo;
pub mod ingredient_repo;
pub mod recipe_repo;
pub mod search_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use collection_repo::CollectionRepo;
pub use ingredient_repo::IngredientRepo;
pub use recipe_repo::RecipeRepo;
pub use search_repo::SearchRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
