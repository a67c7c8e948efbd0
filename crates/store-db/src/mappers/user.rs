//! User entity <-> model mapper

use store_core::entities::User;
use store_core::value_objects::{Role, Snowflake};

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// The password hash stays behind in the model; an unknown role string in
/// storage degrades to the least-privileged role.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            name: model.name,
            role: Role::parse(&model.role).unwrap_or(Role::User),
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_entity_excludes_password_hash() {
        let model = UserModel {
            id: 42,
            email: "a@x.com".to_string(),
            name: Some("Ada".to_string()),
            password_hash: "$argon2id$...".to_string(),
            role: "ADMIN".to_string(),
            created_at: Utc::now(),
        };

        let user = User::from(model);
        assert_eq!(user.id, Snowflake::new(42));
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_unknown_role_degrades_to_user() {
        let model = UserModel {
            id: 1,
            email: "a@x.com".to_string(),
            name: None,
            password_hash: String::new(),
            role: "OWNER".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(User::from(model).role, Role::User);
    }
}
