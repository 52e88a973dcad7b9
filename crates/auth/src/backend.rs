//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns auth-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) so the crate builds
//! without a live database.

use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwt;
use crate::principal::{Principal, Role};

/// Lightweight identity row loaded for authentication.
///
/// Handlers needing the full user record (timestamps, password hash)
/// load it from the accounts repository instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue an access token for a freshly registered or logged-in user
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        jwt::issue_token(&self.config, user_id, email)
    }

    /// Find user identity by ID
    pub(crate) async fn find_user(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, email, name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Load the role set assigned to a user
    pub(crate) async fn find_roles(&self, user_id: Uuid) -> Result<HashSet<Role>, AuthError> {
        let roles: Vec<(Role,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM user_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to load roles");
            AuthError::RolesLoadError
        })?;

        Ok(roles.into_iter().map(|(role,)| role).collect())
    }

    /// Authenticate a bearer token into a principal.
    ///
    /// Roles come from the database on every request, never from the
    /// token, so revoked or added roles apply immediately.
    pub(crate) async fn authenticate_token(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = jwt::validate_token(token, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .find_user(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let roles = self.find_roles(user_id).await?;

        Ok(Principal::new(user.id, user.email, user.name, roles))
    }
}
