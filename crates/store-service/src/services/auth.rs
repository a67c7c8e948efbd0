//! Authentication service
//!
//! Signup, login, token rotation, and logout. Refresh tokens are single-use:
//! a successful rotation revokes the presented token before the replacement
//! is returned, and the storage layer's conditional revoke guarantees that
//! of any concurrent rotations of the same token exactly one succeeds.

use tracing::{info, instrument, warn};

use store_common::AppError;
use store_core::entities::User;
use store_core::{DomainError, Snowflake};

use crate::dto::{
    AckResponse, AuthResponse, LoginRequest, LogoutRequest, RefreshRequest, SignupRequest,
    TokenResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, request.email, request.name);

        // The unique index on email resolves the signup race: a concurrent
        // insert between the exists-check and here still comes back as a
        // conflict, not a duplicate row.
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered");

        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)?;
        self.persist_refresh_token(&pair.refresh_token, user.id)
            .await?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(&user),
        ))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Unknown email and wrong password surface the same error so the
        // response does not reveal whether an account exists
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)?;
        self.persist_refresh_token(&pair.refresh_token, user.id)
            .await?;

        Ok(AuthResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
            UserResponse::from(&user),
        ))
    }

    /// Rotate a refresh token: the presented token is spent, a new pair is issued
    ///
    /// Every step is a hard precondition for the next. The conditional revoke
    /// in step four is what makes the token single-use under concurrency:
    /// whichever caller's revoke reports the transition wins, every other
    /// caller is turned away.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshRequest) -> ServiceResult<TokenResponse> {
        let token = &request.refresh_token;

        // 1. The stored row must exist, be unrevoked, and be unexpired
        let stored = self
            .ctx
            .refresh_token_repo()
            .find_by_token(token)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidRefreshToken))?;

        if !stored.is_valid() {
            warn!(user_id = %stored.user_id, "Refresh rejected: token revoked or expired");
            return Err(ServiceError::App(AppError::InvalidRefreshToken));
        }

        // 2. The token string itself must verify; expired and malformed
        // collapse to the same rejection here
        let claims = self
            .ctx
            .jwt_service()
            .verify_refresh_token(token)
            .map_err(|_| ServiceError::App(AppError::InvalidRefreshToken))?;

        // 3. The subject must still exist
        let user_id = claims
            .user_id()
            .map_err(|_| ServiceError::App(AppError::InvalidRefreshToken))?;
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::UserNotFound))?;

        // 4. Spend the old token. false means another caller already did;
        // that caller got the new pair, this one gets nothing.
        let won = self.ctx.refresh_token_repo().revoke_active(token).await?;
        if !won {
            warn!(user_id = %user.id, "Refresh rejected: lost rotation race");
            return Err(ServiceError::App(AppError::InvalidRefreshToken));
        }

        // 5. Issue and persist the replacement
        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, user.role)?;
        self.persist_refresh_token(&pair.refresh_token, user.id)
            .await?;

        info!(user_id = %user.id, "Refresh token rotated");

        Ok(TokenResponse::new(
            pair.access_token,
            pair.refresh_token,
            pair.expires_in,
        ))
    }

    /// Revoke a refresh token
    ///
    /// Idempotent: an already-revoked, expired, or unknown token still
    /// reports success, since the contract is only that the token cannot
    /// be used afterwards.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<AckResponse> {
        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke_active(&request.refresh_token)
            .await?;

        if revoked {
            info!("Refresh token revoked on logout");
        }

        Ok(AckResponse::ok())
    }

    /// Load the user behind an authenticated request
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Persist a just-issued refresh token
    ///
    /// The stored expiry is read back out of the token itself so row and
    /// claim can never drift.
    async fn persist_refresh_token(&self, token: &str, user_id: Snowflake) -> ServiceResult<()> {
        let claims = self.ctx.jwt_service().verify_refresh_token(token)?;

        self.ctx
            .refresh_token_repo()
            .create(token, user_id, claims.expires_at())
            .await?;

        Ok(())
    }
}
