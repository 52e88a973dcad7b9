//! Domain entities for the Accounts domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use jobdesk_common::{Error, Result};

/// User entity.
///
/// Role assignments live in the `user_roles` table, not on the row:
/// an account holds a set of roles even though registration seeds
/// exactly one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Salted hash, never serialized into responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation. `password_hash` must already
    /// be hashed by `jobdesk_common::crypto`.
    pub fn new(name: String, email: String, password_hash: String) -> Result<Self> {
        if name.is_empty() || name.len() > 255 {
            return Err(Error::Validation(
                "Name must be 1-255 characters".to_string(),
            ));
        }

        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new_valid() {
        let user = User::new(
            "John Doe".to_string(),
            "john@example.com".to_string(),
            "salt:hash".to_string(),
        )
        .unwrap();
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_user_new_rejects_bad_email() {
        let result = User::new(
            "John Doe".to_string(),
            "not-an-email".to_string(),
            "salt:hash".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_new_rejects_empty_name() {
        let result = User::new(
            String::new(),
            "john@example.com".to_string(),
            "salt:hash".to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::new(
            "John Doe".to_string(),
            "john@example.com".to_string(),
            "salt:hash".to_string(),
        )
        .unwrap();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("salt:hash"));
    }
}
