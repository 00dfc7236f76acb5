//! Handlers for the caller's own recipe categories.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use recipebox_core::error::CoreError;
use recipebox_db::models::category::{Category, CreateCategory};
use recipebox_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// A parent, when given, must be one of the caller's own categories.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    input.validate()?;

    if let Some(parent_id) = input.parent_id {
        let parent = CategoryRepo::find_by_id(&state.pool, parent_id).await?;
        if parent.is_none_or(|p| p.user_id != auth.user_id) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "parent_id {parent_id} is not one of your categories"
            ))));
        }
    }

    let category = CategoryRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}
