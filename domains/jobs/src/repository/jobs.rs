//! Job repository

use crate::domain::entities::{Job, JobSearchFilter};
use jobdesk_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

const JOB_COLUMNS: &str =
    "id, title, description, location, company, owner_id, created_at, updated_at";

/// Build the dynamic search query for the provided filters.
///
/// Every present filter becomes a case-insensitive substring clause;
/// clauses are AND-combined. No filters means no WHERE at all.
fn build_search_query(filter: &JobSearchFilter) -> (String, Vec<String>) {
    let mut params: Vec<String> = Vec::new();
    let mut clauses: Vec<String> = Vec::new();

    for (column, value) in [
        ("title", &filter.title),
        ("location", &filter.location),
        ("company", &filter.company),
    ] {
        if let Some(value) = value {
            params.push(format!("%{}%", value));
            clauses.push(format!("{} ILIKE ${}", column, params.len()));
        }
    }

    let mut sql = format!("SELECT {} FROM jobs", JOB_COLUMNS);
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at DESC");

    (sql, params)
}

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find job by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Job>> {
        let row = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a new job posting
    pub async fn create(&self, job: &Job) -> Result<Job> {
        let row = sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (id, title, description, location, company, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.company)
        .bind(job.owner_id)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Persist the mutable fields of an existing job
    pub async fn update(&self, job: &Job) -> Result<Job> {
        let row = sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET
                title = $2, description = $3, location = $4, company = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.company)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a job by ID. Applications referencing it go with it.
    ///
    /// Both deletes run in one transaction: either the job and its
    /// applications are all gone, or nothing is. This also closes the
    /// window where an application inserted between the two statements
    /// would trip the FK on the job delete.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Applications carry an FK to jobs; remove them first
        sqlx::query("DELETE FROM applications WHERE job_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// List every job, newest first
    pub async fn list_all(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY created_at DESC",
            JOB_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List jobs owned by one account, newest first
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Job>> {
        let rows = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs WHERE owner_id = $1 ORDER BY created_at DESC",
            JOB_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Search jobs with optional substring filters
    pub async fn search(&self, filter: &JobSearchFilter) -> Result<Vec<Job>> {
        let (sql, params) = build_search_query(filter);

        let mut query = sqlx::query_as::<_, Job>(&sql);
        for param in &params {
            query = query.bind(param);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
