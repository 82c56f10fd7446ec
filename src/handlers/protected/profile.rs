// handlers/protected/profile.rs - GET/PUT /profile for the authenticated caller

use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use crate::database::models::Profile;
use crate::error::{ApiError, ApiResult, GENERIC_FAULT_MESSAGE};
use crate::middleware::ValidatedUser;
use crate::state::AppState;

/// GET /profile - 404 when the caller has no stored profile
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
) -> ApiResult<Json<Profile>> {
    let profile = state
        .profiles
        .get_by_user_id(user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    Ok(Json(profile))
}

/// PUT /profile - full replace, then return the record as persisted
pub async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<ValidatedUser>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Json(profile) = payload?;

    state.profiles.update(user.user_id, &profile).await?;

    let stored = state.profiles.get_by_user_id(user.user_id).await?.ok_or_else(|| {
        tracing::error!("Profile for user {} missing right after update", user.user_id);
        ApiError::internal_server_error(GENERIC_FAULT_MESSAGE)
    })?;

    tracing::info!("Updated profile for user {}", user.user_id);
    Ok(Json(stored))
}
