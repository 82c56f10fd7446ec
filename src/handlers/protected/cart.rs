// handlers/protected/cart.rs - shopping cart of the authenticated caller

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    Json,
};
use serde::Deserialize;

use crate::database::models::ShoppingCart;
use crate::error::{ApiError, ApiResult};
use crate::middleware::ValidatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuantityUpdate {
    pub quantity: i32,
}

/// GET /cart
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
) -> ApiResult<Json<ShoppingCart>> {
    let cart = state.carts.get_by_user_id(user.user_id).await?;
    Ok(Json(cart))
}

/// POST /cart/products/:product_id - add one unit
pub async fn add_product(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    product_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<ShoppingCart>> {
    let Path(product_id) = product_id?;

    if state.products.get_by_id(product_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Product {} not found", product_id)));
    }

    let cart = state.carts.add_product_to_cart(user.user_id, product_id).await?;
    tracing::debug!("User {} added product {} to cart", user.user_id, product_id);
    Ok(Json(cart))
}

/// PUT /cart/products/:product_id - set quantity of an existing line
pub async fn update_quantity(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    product_id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<QuantityUpdate>, JsonRejection>,
) -> ApiResult<Json<ShoppingCart>> {
    let Path(product_id) = product_id?;
    let Json(update) = payload?;

    if update.quantity < 1 {
        return Err(ApiError::invalid_field("quantity", "must be at least 1"));
    }

    state
        .carts
        .update_product_quantity(user.user_id, product_id, update.quantity)
        .await?;

    let cart = state.carts.get_by_user_id(user.user_id).await?;
    Ok(Json(cart))
}

/// DELETE /cart
pub async fn clear(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
) -> ApiResult<Json<ShoppingCart>> {
    state.carts.clear_cart(user.user_id).await?;
    Ok(Json(ShoppingCart::new()))
}
