use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    recipebox_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "recipes",
        "tags",
        "recipe_tags",
        "categories",
        "recipe_categories",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The search vector is generated from title, description, and instructions.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_vector_is_generated(pool: PgPool) {
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) \
         VALUES ('cook', 'cook@test.com', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO recipes (user_id, title, description, instructions) \
         VALUES ($1, 'Lentil stew', 'Hearty and warming', 'Simmer gently with cumin.')",
    )
    .bind(user_id)
    .execute(&pool)
    .await
    .unwrap();

    for term in ["lentil", "hearty", "cumin"] {
        let hits: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM recipes WHERE search_vector @@ plainto_tsquery('english', $1)",
        )
        .bind(term)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(hits, 1, "'{term}' should match the generated vector");
    }
}

/// Check constraints reject out-of-domain values.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recipe_check_constraints(pool: PgPool) {
    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash) \
         VALUES ('cook', 'cook@test.com', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let bad_difficulty = sqlx::query(
        "INSERT INTO recipes (user_id, title, instructions, difficulty) \
         VALUES ($1, 'Toast', 'Toast the bread.', 'extreme')",
    )
    .bind(user_id)
    .execute(&pool)
    .await;
    assert!(bad_difficulty.is_err());

    let bad_servings = sqlx::query(
        "INSERT INTO recipes (user_id, title, instructions, servings) \
         VALUES ($1, 'Toast', 'Toast the bread.', 0)",
    )
    .bind(user_id)
    .execute(&pool)
    .await;
    assert!(bad_servings.is_err());
}
