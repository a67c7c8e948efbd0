//! User entity - a customer or administrator account

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, Snowflake};

/// Account identity record
///
/// The password hash is deliberately not part of the entity; it lives only
/// in the storage layer and is fetched separately for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the default `USER` role
    pub fn new(id: Snowflake, email: String, name: Option<String>) -> Self {
        Self {
            id,
            email,
            name,
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// Check if the account holds the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults_to_user_role() {
        let user = User::new(Snowflake::new(1), "a@x.com".to_string(), None);
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_admin_role() {
        let mut user = User::new(Snowflake::new(1), "admin@x.com".to_string(), None);
        user.role = Role::Admin;
        assert!(user.is_admin());
    }
}
