// handlers/elevated/categories.rs - category writes (admin only)

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::database::models::Category;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn validate(category: &Category) -> Result<(), ApiError> {
    if category.name.trim().is_empty() {
        return Err(ApiError::invalid_field("name", "must not be blank"));
    }
    Ok(())
}

async fn ensure_exists(state: &AppState, category_id: i32) -> Result<(), ApiError> {
    match state.categories.get_by_id(category_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::not_found(format!("Category {} not found", category_id))),
    }
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Category>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(category) = payload?;
    validate(&category)?;

    let created = state.categories.create(&category).await?;
    tracing::info!("Created category {} ({})", created.category_id, created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /categories/:id
pub async fn update(
    State(state): State<AppState>,
    category_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Category>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Path(category_id) = category_id?;
    let Json(category) = payload?;
    validate(&category)?;
    ensure_exists(&state, category_id).await?;

    state.categories.update(category_id, &category).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /categories/:id - 409 while products still reference it
pub async fn delete(
    State(state): State<AppState>,
    category_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(category_id) = category_id?;
    ensure_exists(&state, category_id).await?;

    state.categories.delete(category_id).await?;
    tracing::info!("Deleted category {}", category_id);
    Ok(StatusCode::NO_CONTENT)
}
