//! Refresh token entity <-> model mapper

use store_core::entities::RefreshToken;
use store_core::value_objects::Snowflake;

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            token: model.token,
            user_id: Snowflake::new(model.user_id),
            expires_at: model.expires_at,
            revoked: model.revoked,
            created_at: model.created_at,
        }
    }
}
