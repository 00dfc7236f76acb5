//! Handlers for the `/tags` resource.
//!
//! Any signed-in user can list, read, and create tags; renaming, recoloring,
//! and deleting are admin-only.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipebox_core::error::CoreError;
use recipebox_core::tag::{normalize_tag_name, validate_color, validate_tag_name};
use recipebox_core::types::DbId;
use recipebox_db::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};
use recipebox_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tags
pub async fn list_tags(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tags
///
/// Returns the existing tag when the normalized name is already taken.
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let name = normalize_tag_name(&input.name);
    validate_tag_name(&name)?;
    if let Some(color) = input.color.as_deref() {
        validate_color(color)?;
    }

    let tag = TagRepo::create_or_get(&state.pool, &name, input.color.as_deref()).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created or reused");

    Ok(Json(DataResponse { data: tag }))
}

/// GET /api/v1/tags/{id}
pub async fn get_tag(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let tag = TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or_else(|| not_found(tag_id))?;
    Ok(Json(DataResponse { data: tag }))
}

/// PUT /api/v1/tags/{id}
///
/// Rename and/or recolor a tag. Admin only.
pub async fn update_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<Json<DataResponse<Tag>>> {
    let name = input.name.as_deref().map(normalize_tag_name);
    if let Some(name) = name.as_deref() {
        validate_tag_name(name)?;
    }
    if let Some(color) = input.color.as_deref() {
        validate_color(color)?;
    }

    let tag = TagRepo::update(&state.pool, tag_id, name.as_deref(), input.color.as_deref())
        .await?
        .ok_or_else(|| not_found(tag_id))?;

    tracing::info!(tag_id, user_id = admin.user_id, "Tag updated");

    Ok(Json(DataResponse { data: tag }))
}

/// DELETE /api/v1/tags/{id}
///
/// Delete a tag and detach it from every recipe. Admin only.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TagRepo::delete(&state.pool, tag_id).await? {
        return Err(not_found(tag_id));
    }

    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tag", id })
}
