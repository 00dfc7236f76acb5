//! Integration tests for the ingredient catalogue and recipe ingredient lists.

mod common;

use assert_matches::assert_matches;
use common::{create_ingredient, create_user, grams, insert_recipe, new_recipe};
use recipebox_db::models::ingredient::{CreateIngredient, UpdateIngredient};
use recipebox_db::models::recipe::CreateRecipe;
use recipebox_db::repositories::{IngredientRepo, RecipeRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_alphabetical_and_search_is_substring(pool: PgPool) {
    for name in ["Tomato", "Basil", "Cherry tomato", "Garlic"] {
        create_ingredient(&pool, name).await;
    }

    let all = IngredientRepo::list(&pool).await.unwrap();
    let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Basil", "Cherry tomato", "Garlic", "Tomato"]);

    let found = IngredientRepo::search(&pool, "TOMATO").await.unwrap();
    let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Cherry tomato", "Tomato"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_caps_results_and_escapes_wildcards(pool: PgPool) {
    for n in 0..12 {
        create_ingredient(&pool, &format!("Pepper {n:02}")).await;
    }
    create_ingredient(&pool, "100% cocoa").await;

    let capped = IngredientRepo::search(&pool, "pepper").await.unwrap();
    assert_eq!(capped.len(), 10);
    assert_eq!(capped[0].name, "Pepper 00");

    let literal = IngredientRepo::search(&pool, "%").await.unwrap();
    let names: Vec<&str> = literal.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["100% cocoa"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_violates_unique(pool: PgPool) {
    create_ingredient(&pool, "Flour").await;

    let input = CreateIngredient {
        name: "  Flour ".into(),
        category: Some("baking".into()),
    };
    let err = IngredientRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db) if db.constraint() == Some("uq_ingredients_name")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_only_present_fields(pool: PgPool) {
    let input = CreateIngredient {
        name: "Cumin".into(),
        category: Some("spice".into()),
    };
    let cumin = IngredientRepo::create(&pool, &input).await.unwrap();

    let patch = UpdateIngredient {
        name: Some("Ground cumin".into()),
        ..Default::default()
    };
    let updated = IngredientRepo::update(&pool, cumin.id, &patch)
        .await
        .unwrap()
        .expect("ingredient should exist");
    assert_eq!(updated.name, "Ground cumin");
    assert_eq!(updated.category.as_deref(), Some("spice"));

    let missing = IngredientRepo::update(&pool, 9999, &patch).await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recipe_create_stores_lines_in_order(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let flour = create_ingredient(&pool, "Flour").await;
    let butter = create_ingredient(&pool, "Butter").await;

    let input = CreateRecipe {
        ingredients: vec![grams(flour.id, 250.0), grams(butter.id, 125.0)],
        ..new_recipe("Shortbread")
    };
    let recipe = insert_recipe(&pool, user.id, input).await;

    let detail = RecipeRepo::find_detail(&pool, recipe.id)
        .await
        .unwrap()
        .expect("recipe should exist");
    let lines: Vec<(&str, Option<f64>)> = detail
        .ingredients
        .iter()
        .map(|l| (l.name.as_str(), l.quantity))
        .collect();
    assert_eq!(lines, vec![("Flour", Some(250.0)), ("Butter", Some(125.0))]);
    assert_eq!(detail.ingredients[0].unit.as_deref(), Some("g"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_ingredient_rolls_back_recipe_create(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let input = CreateRecipe {
        ingredients: vec![grams(4242, 1.0)],
        ..new_recipe("Mystery stew")
    };

    let err = RecipeRepo::create(&pool, user.id, &input, "medium")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("fk_recipe_ingredients_ingredient")
    );

    let recipes: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(recipes, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_swaps_the_whole_list_atomically(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let rice = create_ingredient(&pool, "Rice").await;
    let beans = create_ingredient(&pool, "Beans").await;
    let input = CreateRecipe {
        ingredients: vec![grams(rice.id, 200.0)],
        ..new_recipe("Rice and beans")
    };
    let recipe = insert_recipe(&pool, user.id, input).await;

    let lines = IngredientRepo::replace_for_recipe(
        &pool,
        recipe.id,
        &[grams(beans.id, 150.0), grams(rice.id, 100.0)],
    )
    .await
    .unwrap();
    let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Beans", "Rice"]);

    // A bad line leaves the previous list in place.
    let result =
        IngredientRepo::replace_for_recipe(&pool, recipe.id, &[grams(rice.id, 1.0), grams(777, 1.0)])
            .await;
    assert!(result.is_err());
    let kept = IngredientRepo::list_for_recipe(&pool, recipe.id).await.unwrap();
    assert_eq!(kept.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_an_ingredient_removes_it_from_recipes(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let salt = create_ingredient(&pool, "Salt").await;
    let input = CreateRecipe {
        ingredients: vec![grams(salt.id, 5.0)],
        ..new_recipe("Brine")
    };
    let recipe = insert_recipe(&pool, user.id, input).await;

    assert!(IngredientRepo::delete(&pool, salt.id).await.unwrap());
    assert!(!IngredientRepo::delete(&pool, salt.id).await.unwrap());
    assert!(IngredientRepo::list_for_recipe(&pool, recipe.id)
        .await
        .unwrap()
        .is_empty());
}
