//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The session manager only ever talks to
//! these traits, so tests can substitute in-memory implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    ///
    /// Fails with `DomainError::EmailAlreadyExists` when the unique email
    /// constraint is violated.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Find a stored refresh token by its token string
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>>;

    /// Persist a newly issued refresh token
    async fn create(
        &self,
        token: &str,
        user_id: Snowflake,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<()>;

    /// Atomically revoke the token if it is not yet revoked
    ///
    /// Must be a single conditional update at the storage layer: of any
    /// number of concurrent callers presenting the same token, exactly one
    /// observes `true`. Returns `false` when the row is absent or already
    /// revoked. The transition is permanent; there is no un-revoke.
    async fn revoke_active(&self, token: &str) -> RepoResult<bool>;
}
