//! The principal model: an authenticated user plus its role set
//!
//! Role checks throughout the workspace are set-membership tests, never
//! single-field equality, so accounts holding several roles keep working.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Roles assignable to an account.
///
/// Seed data assigns exactly one role per account, but nothing relies
/// on that: a principal carries a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_name", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employer,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employer => "employer",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "employer" => Ok(Role::Employer),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// An authenticated caller and its role set.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: HashSet<Role>,
}

impl Principal {
    pub fn new(id: Uuid, email: String, name: String, roles: HashSet<Role>) -> Self {
        Self {
            id,
            email,
            name,
            roles,
        }
    }

    /// Set-membership role check
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_employer(&self) -> bool {
        self.has_role(Role::Employer)
    }

    /// Role names, sorted for stable output
    pub fn role_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.roles.iter().map(Role::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal_with(roles: &[Role]) -> Principal {
        Principal::new(
            Uuid::new_v4(),
            "test@example.com".to_string(),
            "Test User".to_string(),
            roles.iter().copied().collect(),
        )
    }

    #[test]
    fn test_role_parse_roundtrip() {
        for role in [Role::Admin, Role::Employer, Role::User] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_checks_are_set_membership() {
        // A multi-role account passes every check for roles it holds
        let principal = principal_with(&[Role::Employer, Role::User]);
        assert!(principal.is_employer());
        assert!(principal.has_role(Role::User));
        assert!(!principal.is_admin());
    }

    #[test]
    fn test_role_names_sorted() {
        let principal = principal_with(&[Role::User, Role::Admin, Role::Employer]);
        assert_eq!(principal.role_names(), vec!["admin", "employer", "user"]);
    }
}
