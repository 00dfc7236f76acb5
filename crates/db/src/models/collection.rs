//! Collection models and DTOs.

use recipebox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::recipe::Recipe;

/// A row from the `collections` table. A collection is a user's private,
/// named list of recipes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collection {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A collection with its recipe count and, on request, the recipes.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionDetail {
    #[serde(flatten)]
    pub collection: Collection,
    pub recipe_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
}

/// DTO for `POST /collections`. The owner comes from the access token.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCollection {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// DTO for `PUT /collections/{id}`. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCollection {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Query parameters for `GET /collections/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionQuery {
    #[serde(default)]
    pub include_recipes: bool,
}

/// DTO for `POST /collections/{id}/recipes`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddCollectionRecipe {
    pub recipe_id: DbId,
}
