//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use recipebox_db::models::ingredient::{CreateIngredient, Ingredient, RecipeIngredientInput};
use recipebox_db::models::recipe::{CreateRecipe, Recipe};
use recipebox_db::models::user::{CreateUser, User};
use recipebox_db::repositories::{IngredientRepo, RecipeRepo, UserRepo};
use sqlx::PgPool;

/// Insert a user with a throwaway password hash.
pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
        display_name: None,
        is_admin: false,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// A minimal valid recipe body with the given title.
pub fn new_recipe(title: &str) -> CreateRecipe {
    CreateRecipe {
        title: title.to_string(),
        description: None,
        instructions: "Combine everything and cook until done.".to_string(),
        prep_time: None,
        cook_time: None,
        servings: None,
        difficulty: None,
        image_url: None,
        is_public: None,
        tags: vec![],
        category_ids: vec![],
        ingredients: vec![],
    }
}

/// Insert a recipe, defaulting difficulty to `medium`.
pub async fn insert_recipe(pool: &PgPool, user_id: i64, input: CreateRecipe) -> Recipe {
    let difficulty = input.difficulty.clone().unwrap_or_else(|| "medium".to_string());
    RecipeRepo::create(pool, user_id, &input, &difficulty)
        .await
        .expect("recipe creation should succeed")
}

/// Insert `count` plain recipes titled `"{prefix} {n}"`.
pub async fn insert_many(pool: &PgPool, user_id: i64, prefix: &str, count: usize) -> Vec<Recipe> {
    let mut recipes = Vec::with_capacity(count);
    for n in 1..=count {
        recipes.push(insert_recipe(pool, user_id, new_recipe(&format!("{prefix} {n}"))).await);
    }
    recipes
}

/// Insert an ingredient with no category.
pub async fn create_ingredient(pool: &PgPool, name: &str) -> Ingredient {
    let input = CreateIngredient {
        name: name.to_string(),
        category: None,
    };
    IngredientRepo::create(pool, &input)
        .await
        .expect("ingredient creation should succeed")
}

/// An ingredient line with a quantity in grams.
pub fn grams(ingredient_id: i64, quantity: f64) -> RecipeIngredientInput {
    RecipeIngredientInput {
        ingredient_id,
        quantity: Some(quantity),
        unit: Some("g".to_string()),
        notes: None,
    }
}
