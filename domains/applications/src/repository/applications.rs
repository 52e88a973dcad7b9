//! Application repository
//!
//! The unique index on (user_id, job_id) is the source of truth for
//! the one-application-per-job invariant. The existence pre-check in
//! the handler is an optimization for a friendlier error, not a guard;
//! two concurrent inserts race to the constraint and exactly one wins.

use crate::domain::entities::{Application, ApplicationWithDetails, ApplicationWithJob};
use jobdesk_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the referenced job exists
    pub async fn job_exists(&self, job_id: Uuid) -> Result<bool> {
        let exists: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    /// Find an existing application for a (user, job) pair
    pub async fn find_for_user_and_job(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            SELECT id, user_id, job_id, cover_letter, created_at
            FROM applications
            WHERE user_id = $1 AND job_id = $2
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a new application.
    ///
    /// A unique violation on (user_id, job_id) is translated to
    /// Conflict; under concurrent submission this, not the pre-check,
    /// is what keeps the second attempt out.
    pub async fn create(&self, application: &Application) -> Result<Application> {
        let row = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (id, user_id, job_id, cover_letter, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, job_id, cover_letter, created_at
            "#,
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(application.job_id)
        .bind(&application.cover_letter)
        .bind(application.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("Already applied to this job".to_string())
            }
            _ => Error::Database(e),
        })?;
        Ok(row)
    }

    /// Applications submitted by one user, each joined with its job
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.user_id, a.job_id, a.cover_letter, a.created_at,
                   j.title as job_title, j.location as job_location, j.company as job_company
            FROM applications a
            INNER JOIN jobs j ON a.job_id = j.id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Applications to jobs owned by one account, joined with applicant and job
    pub async fn list_for_job_owner(&self, owner_id: Uuid) -> Result<Vec<ApplicationWithDetails>> {
        let rows = sqlx::query_as::<_, ApplicationWithDetails>(
            r#"
            SELECT a.id, a.user_id, a.job_id, a.cover_letter, a.created_at,
                   u.name as applicant_name, u.email as applicant_email,
                   j.title as job_title, j.location as job_location,
                   j.company as job_company, j.owner_id as job_owner_id
            FROM applications a
            INNER JOIN jobs j ON a.job_id = j.id
            INNER JOIN users u ON a.user_id = u.id
            WHERE j.owner_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every application, joined with applicant and job
    pub async fn list_all(&self) -> Result<Vec<ApplicationWithDetails>> {
        let rows = sqlx::query_as::<_, ApplicationWithDetails>(
            r#"
            SELECT a.id, a.user_id, a.job_id, a.cover_letter, a.created_at,
                   u.name as applicant_name, u.email as applicant_email,
                   j.title as job_title, j.location as job_location,
                   j.company as job_company, j.owner_id as job_owner_id
            FROM applications a
            INNER JOIN jobs j ON a.job_id = j.id
            INNER JOIN users u ON a.user_id = u.id
            ORDER BY a.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        PgPool::connect(&url).await.expect("failed to connect")
    }

    async fn seed_user(pool: &PgPool) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind("Applications Test User")
            .bind(format!("{}@applications-test.example.com", id))
            .bind("salt:hash")
            .execute(pool)
            .await
            .expect("failed to seed user");
        id
    }

    async fn seed_job(pool: &PgPool, owner_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO jobs (id, title, description, location, company, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind("Backend Developer")
        .bind("Build the backend")
        .bind("Casablanca")
        .bind("TechCorp")
        .bind(owner_id)
        .execute(pool)
        .await
        .expect("failed to seed job");
        id
    }

    async fn cleanup(pool: &PgPool, user_id: Uuid, job_id: Uuid) {
        sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(job_id)
            .execute(pool)
            .await
            .ok();
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(job_id)
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
    async fn test_duplicate_application_is_conflict_at_the_constraint() {
        let pool = test_pool().await;
        let repo = ApplicationRepository::new(pool.clone());

        let user_id = seed_user(&pool).await;
        let job_id = seed_job(&pool, user_id).await;

        let first = Application::new(user_id, job_id, Some("Hi".to_string()));
        repo.create(&first).await.expect("first application should insert");

        // Straight to the insert, no pre-check: the unique index on
        // (user_id, job_id) is what keeps the second row out
        let second = Application::new(user_id, job_id, None);
        let err = repo.create(&second).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // Exactly one row persisted
        let existing = repo
            .find_for_user_and_job(user_id, job_id)
            .await
            .unwrap()
            .expect("first application should still exist");
        assert_eq!(existing.id, first.id);

        cleanup(&pool, user_id, job_id).await;
    }
}
