//! User repository

use crate::domain::entities::User;
use jobdesk_auth::Role;
use jobdesk_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user and its initial role assignment atomically.
    ///
    /// The unique index on `users.email` is the authoritative guard for
    /// email uniqueness; a violation surfaces as Conflict.
    pub async fn create(&self, user: &User, role: Role) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        let created: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("Email is already registered".to_string())
            }
            _ => Error::Database(e),
        })?;

        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2)")
            .bind(created.id)
            .bind(role)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Roles assigned to a user, sorted for stable responses
    pub async fn roles_for_user(&self, user_id: Uuid) -> Result<Vec<Role>> {
        let rows: Vec<(Role,)> = sqlx::query_as(
            r#"
            SELECT role
            FROM user_roles
            WHERE user_id = $1
            ORDER BY role ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(role,)| role).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        PgPool::connect(&url).await.expect("failed to connect")
    }

    async fn cleanup(pool: &PgPool, user_id: Uuid) {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(pool)
            .await
            .ok();
    }

    #[tokio::test]
    #[ignore] // Requires DATABASE_URL pointing at a migrated database - run locally only
    async fn test_duplicate_email_is_conflict_at_the_index() {
        let pool = test_pool().await;
        let repo = UserRepository::new(pool.clone());

        let email = format!("{}@accounts-test.example.com", Uuid::new_v4());

        let first = User::new(
            "First Account".to_string(),
            email.clone(),
            "salt:hash".to_string(),
        )
        .unwrap();
        let created = repo
            .create(&first, Role::User)
            .await
            .expect("first user should insert");
        assert_eq!(repo.roles_for_user(created.id).await.unwrap(), vec![Role::User]);

        // The unique index on users.email is the authoritative guard
        let second = User::new(
            "Second Account".to_string(),
            email,
            "salt:hash".to_string(),
        )
        .unwrap();
        let err = repo.create(&second, Role::User).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // The failed transaction left no orphaned role row behind
        assert!(repo.roles_for_user(second.id).await.unwrap().is_empty());

        cleanup(&pool, created.id).await;
    }
}
