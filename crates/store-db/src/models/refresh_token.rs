//! Refresh token database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for refresh_tokens table
///
/// The token string is the primary key; the embedded JWT expiry is
/// duplicated into `expires_at` for range checks without re-parsing.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenModel {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenModel {
    /// Check if token is expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if token is valid (not revoked and not expired)
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}
