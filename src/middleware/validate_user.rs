use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller resolved against the users table
#[derive(Clone, Debug)]
pub struct ValidatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

impl ValidatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == crate::database::models::user::ROLE_ADMIN
    }
}

impl From<User> for ValidatedUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Resolves the JWT principal to a user id. Must run after `jwt_auth_middleware`.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before user validation"))?;

    let user = state
        .users
        .get_by_username(&auth_user.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User validation failed: '{}' not found", auth_user.username);
            ApiError::unauthorized("Unknown user")
        })?;

    // Verify access level matches JWT claims
    if user.role != auth_user.role {
        tracing::warn!(
            "User validation failed: JWT role '{}' doesn't match database role '{}' for '{}'",
            auth_user.role,
            user.role,
            user.username
        );
        return Err(ApiError::forbidden("User role mismatch"));
    }

    tracing::debug!("User validation successful: {} (id {})", user.username, user.user_id);

    request.extensions_mut().insert(ValidatedUser::from(user));

    Ok(next.run(request).await)
}

/// Rejects callers without the admin role. Must run after `validate_user_middleware`.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<ValidatedUser>()
        .ok_or_else(|| ApiError::internal_server_error("User validation required before admin check"))?;

    if !user.is_admin() {
        tracing::warn!("Admin access denied for '{}'", user.username);
        return Err(ApiError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}
