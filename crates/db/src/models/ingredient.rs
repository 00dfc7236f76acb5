//! Ingredient models and DTOs.

use recipebox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ingredients` table. Ingredients are shared by all users.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    /// Free-form grouping such as `dairy` or `spice`.
    pub category: Option<String>,
    pub created_at: Timestamp,
}

/// One line of a recipe's ingredient list, joined with the ingredient name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredient {
    pub id: DbId,
    pub ingredient_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// DTO for `POST /ingredients`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIngredient {
    #[validate(length(min = 2, max = 255))]
    pub name: String,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

/// DTO for `PUT /ingredients/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateIngredient {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
}

/// Query parameters for `GET /ingredients`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientListParams {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
}

/// One ingredient line in a recipe create or replace request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeIngredientInput {
    pub ingredient_id: DbId,
    #[validate(range(min = 0.0))]
    pub quantity: Option<f64>,
    #[validate(length(max = 50))]
    pub unit: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// DTO for `PUT /recipes/{id}/ingredients`: the full replacement list.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetRecipeIngredients {
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// The first ingredient id listed more than once, if any.
pub fn repeated_ingredient(lines: &[RecipeIngredientInput]) -> Option<DbId> {
    let mut seen = std::collections::HashSet::with_capacity(lines.len());
    lines
        .iter()
        .map(|line| line.ingredient_id)
        .find(|id| !seen.insert(*id))
}
