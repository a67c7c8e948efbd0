//! Authentication handlers
//!
//! Endpoints for signup, login, token rotation, and logout.

use axum::{extract::State, Json};

use store_service::dto::{
    AckResponse, AuthResponse, LoginRequest, LogoutRequest, RefreshRequest, SignupRequest,
    TokenResponse,
};
use store_service::AuthService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.signup(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Rotate a refresh token for a new pair
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Revoke a refresh token
///
/// POST /api/auth/logout
///
/// Takes the refresh token in the body rather than requiring a bearer
/// header, so a client with an expired access token can still log out.
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LogoutRequest>,
) -> ApiResult<Json<AckResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.logout(request).await?;
    Ok(Json(response))
}
