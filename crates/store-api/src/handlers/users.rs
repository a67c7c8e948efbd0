//! User handlers

use axum::{extract::State, Json};

use store_service::dto::UserResponse;
use store_service::AuthService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the authenticated user's own profile
///
/// GET /api/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = AuthService::new(state.service_context());
    let user = service.current_user(auth.user_id).await?;
    Ok(Json(user))
}
