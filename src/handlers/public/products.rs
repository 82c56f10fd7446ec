use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::database::models::Product;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /products/:id
pub async fn get(
    State(state): State<AppState>,
    product_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(product_id) = product_id?;

    let product = state
        .products
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product {} not found", product_id)))?;

    Ok(Json(product))
}
