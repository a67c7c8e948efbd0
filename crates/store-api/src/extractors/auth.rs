//! Authentication extractors
//!
//! Extract and verify the bearer access token from the Authorization
//! header. `AuthUser` admits any authenticated account; `AdminUser`
//! additionally requires the ADMIN role.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use store_common::AppError;
use store_core::{Role, Snowflake};

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Snowflake,
    pub role: Role,
}

impl AuthUser {
    pub fn new(user_id: Snowflake, role: Role) -> Self {
        Self { user_id, role }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Expired and malformed both collapse to the same 401 here; the
        // codec keeps them distinct for callers that care
        let claims = app_state
            .jwt_service()
            .verify_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                ApiError::App(AppError::InvalidToken)
            })?;

        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid subject in access token");
            ApiError::App(AppError::InvalidToken)
        })?;

        Ok(AuthUser::new(user_id, claims.role))
    }
}

/// Authenticated user that must hold the ADMIN role
///
/// The role comes from the verified token claims, not a storage lookup;
/// a role change takes effect once the current access token expires.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        if !auth.role.is_admin() {
            tracing::warn!(user_id = %auth.user_id, "Admin route denied");
            return Err(ApiError::App(AppError::Forbidden));
        }

        Ok(AdminUser(auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::{header, Request, StatusCode};
    use chrono::{DateTime, Utc};

    use store_common::auth::{JwtService, PasswordService};
    use store_common::{
        AppConfig, AppSettings, CorsConfig, DatabaseConfig, Environment, JwtConfig,
        RateLimitConfig, ServerConfig, SnowflakeConfig,
    };
    use store_core::entities::{RefreshToken, User};
    use store_core::traits::{RefreshTokenRepository, RepoResult, UserRepository};
    use store_core::SnowflakeGenerator;
    use store_service::ServiceContext;

    struct NoopUserRepository;

    #[async_trait]
    impl UserRepository for NoopUserRepository {
        async fn find_by_id(&self, _id: Snowflake) -> RepoResult<Option<User>> {
            Ok(None)
        }
        async fn find_by_email(&self, _email: &str) -> RepoResult<Option<User>> {
            Ok(None)
        }
        async fn email_exists(&self, _email: &str) -> RepoResult<bool> {
            Ok(false)
        }
        async fn create(&self, _user: &User, _password_hash: &str) -> RepoResult<()> {
            Ok(())
        }
        async fn get_password_hash(&self, _id: Snowflake) -> RepoResult<Option<String>> {
            Ok(None)
        }
    }

    struct NoopRefreshTokenRepository;

    #[async_trait]
    impl RefreshTokenRepository for NoopRefreshTokenRepository {
        async fn find_by_token(&self, _token: &str) -> RepoResult<Option<RefreshToken>> {
            Ok(None)
        }
        async fn create(
            &self,
            _token: &str,
            _user_id: Snowflake,
            _expires_at: DateTime<Utc>,
        ) -> RepoResult<()> {
            Ok(())
        }
        async fn revoke_active(&self, _token: &str) -> RepoResult<bool> {
            Ok(false)
        }
    }

    const TEST_SECRET: &str = "test-secret-key-that-is-long-enough";

    fn test_state() -> AppState {
        let ctx = ServiceContext::new(
            Arc::new(NoopUserRepository),
            Arc::new(NoopRefreshTokenRepository),
            Arc::new(JwtService::new(TEST_SECRET, 900, 604_800)),
            PasswordService::new(),
            Arc::new(SnowflakeGenerator::new(1)),
        );

        let config = AppConfig {
            app: AppSettings {
                name: "test".to_string(),
                env: Environment::Development,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                access_token_expiry: 900,
                refresh_token_expiry: 604_800,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: 100,
                burst: 100,
            },
            cors: CorsConfig {
                allowed_origins: Vec::new(),
            },
            snowflake: SnowflakeConfig { worker_id: 1 },
        };

        AppState::new(ctx, config)
    }

    fn parts_with_bearer(token: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/me");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_access_token_is_accepted() {
        let state = test_state();
        let token = state
            .jwt_service()
            .issue_access_token(Snowflake::new(42), Role::User)
            .unwrap();
        let mut parts = parts_with_bearer(Some(&token));

        let auth = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(auth.user_id, Snowflake::new(42));
        assert!(!auth.role.is_admin());
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let state = test_state();
        let mut parts = parts_with_bearer(None);

        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_garbage_token_is_401() {
        let state = test_state();
        let mut parts = parts_with_bearer(Some("not.a.jwt"));

        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let state = test_state();
        let token = state
            .jwt_service()
            .issue_refresh_token(Snowflake::new(42), Role::User)
            .unwrap();
        let mut parts = parts_with_bearer(Some(&token));

        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_gate_rejects_user_role() {
        let state = test_state();
        let token = state
            .jwt_service()
            .issue_access_token(Snowflake::new(42), Role::User)
            .unwrap();
        let mut parts = parts_with_bearer(Some(&token));

        let err = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_admin_gate_accepts_admin_role() {
        let state = test_state();
        let token = state
            .jwt_service()
            .issue_access_token(Snowflake::new(7), Role::Admin)
            .unwrap();
        let mut parts = parts_with_bearer(Some(&token));

        let admin = AdminUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(admin.0.user_id, Snowflake::new(7));
        assert!(admin.0.role.is_admin());
    }
}
