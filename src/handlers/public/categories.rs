// handlers/public/categories.rs - read-only category endpoints

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::database::models::{Category, Product};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /categories
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.categories.list_all().await?;
    Ok(Json(categories))
}

/// GET /categories/:id
pub async fn get(
    State(state): State<AppState>,
    category_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(category_id) = category_id?;

    let category = state
        .categories
        .get_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category {} not found", category_id)))?;

    Ok(Json(category))
}

/// GET /categories/:id/products
pub async fn products(
    State(state): State<AppState>,
    category_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Path(category_id) = category_id?;
    let products = state.products.list_by_category_id(category_id).await?;
    Ok(Json(products))
}
