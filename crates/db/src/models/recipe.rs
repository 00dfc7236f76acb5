//! Recipe models and DTOs.

use recipebox_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::category::Category;
use super::ingredient::{RecipeIngredient, RecipeIngredientInput};
use super::tag::TagInfo;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `recipes` table (without the generated `search_vector`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub instructions: String,
    /// Minutes; `None` when the author did not say.
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: i32,
    /// One of `easy`, `medium`, `hard`.
    pub difficulty: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A recipe with its ingredients, tags, and categories, as returned by
/// `GET /recipes/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<TagInfo>,
    pub categories: Vec<Category>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a recipe. The owner comes from the access token.
///
/// `difficulty` and `image_url` are checked against the core rules by the
/// handler before insert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipe {
    #[validate(length(min = 3, max = 255))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub instructions: String,
    #[validate(range(min = 0, max = 1440))]
    pub prep_time: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub cook_time: Option<i32>,
    /// Defaults to 1.
    #[validate(range(min = 1, max = 50))]
    pub servings: Option<i32>,
    /// Defaults to `medium`.
    pub difficulty: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    /// Defaults to `true`.
    pub is_public: Option<bool>,
    /// Tag names to attach; unknown tags are created.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Category ids to attach. Only the caller's own categories are linked.
    #[serde(default)]
    pub category_ids: Vec<DbId>,
    /// Ingredient lines, in display order.
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// DTO for updating a recipe. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecipe {
    #[validate(length(min = 3, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub instructions: Option<String>,
    #[validate(range(min = 0, max = 1440))]
    pub prep_time: Option<i32>,
    #[validate(range(min = 0, max = 1440))]
    pub cook_time: Option<i32>,
    #[validate(range(min = 1, max = 50))]
    pub servings: Option<i32>,
    pub difficulty: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    pub is_public: Option<bool>,
}

/// DTO for `PUT /recipes/{id}/tags`: the full replacement tag set.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRecipeTags {
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateRecipe {
        CreateRecipe {
            title: "Tomato soup".into(),
            description: None,
            instructions: "Simmer the tomatoes for an hour.".into(),
            prep_time: Some(10),
            cook_time: None,
            servings: Some(4),
            difficulty: None,
            image_url: None,
            is_public: None,
            tags: vec![],
            category_ids: vec![],
            ingredients: vec![],
        }
    }

    #[test]
    fn create_accepts_valid_input() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn create_rejects_short_title() {
        let input = CreateRecipe {
            title: "ab".into(),
            ..valid_create()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn create_rejects_out_of_range_numbers() {
        let input = CreateRecipe {
            prep_time: Some(1441),
            servings: Some(0),
            ..valid_create()
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("prep_time"));
        assert!(fields.contains_key("servings"));
    }

    #[test]
    fn update_with_no_fields_is_valid() {
        assert!(UpdateRecipe::default().validate().is_ok());
    }

    #[test]
    fn update_checks_present_fields() {
        let input = UpdateRecipe {
            instructions: Some("short".into()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn detail_flattens_recipe_fields() {
        let now = chrono::Utc::now();
        let detail = RecipeDetail {
            recipe: Recipe {
                id: 7,
                user_id: 1,
                title: "Pancakes".into(),
                description: None,
                instructions: "Mix and fry in a hot pan.".into(),
                prep_time: None,
                cook_time: Some(15),
                servings: 2,
                difficulty: "easy".into(),
                image_url: None,
                is_public: true,
                created_at: now,
                updated_at: now,
            },
            ingredients: vec![],
            tags: vec![],
            categories: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Pancakes");
        assert!(json["prep_time"].is_null());
        assert!(json["tags"].as_array().unwrap().is_empty());
        assert!(json["ingredients"].as_array().unwrap().is_empty());
    }

    #[test]
    fn create_validates_nested_ingredient_lines() {
        let input = CreateRecipe {
            ingredients: vec![RecipeIngredientInput {
                ingredient_id: 1,
                quantity: Some(-2.0),
                unit: None,
                notes: None,
            }],
            ..valid_create()
        };
        assert!(input.validate().is_err());
    }
}
