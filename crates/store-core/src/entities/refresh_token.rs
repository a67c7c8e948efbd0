//! Refresh token entity - a persisted, single-use session credential

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Persisted refresh token record
///
/// The token string itself is the primary lookup key. `revoked` transitions
/// false -> true exactly once (rotation or logout) and never back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: Snowflake,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Create a new, not-yet-revoked record
    pub fn new(token: String, user_id: Snowflake, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            user_id,
            expires_at,
            revoked: false,
            created_at: Utc::now(),
        }
    }

    /// Check if the stored expiry has passed
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Usable for refresh/logout: not revoked and not expired
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.revoked && !self.is_expired()
    }
}
