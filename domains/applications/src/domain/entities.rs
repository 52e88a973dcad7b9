//! Domain entities for the Applications domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidacy linking a user to a job posting.
///
/// At most one exists per (user_id, job_id) pair; the database unique
/// constraint is the authoritative guard. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Application {
    pub fn new(user_id: Uuid, job_id: Uuid, cover_letter: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            job_id,
            cover_letter,
            created_at: Utc::now(),
        }
    }
}

/// Application with its job joined, for applicant-facing listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub job_location: String,
    pub job_company: String,
}

/// Application with applicant and job joined, for employer and admin listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ApplicationWithDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub applicant_name: String,
    pub applicant_email: String,
    pub job_title: String,
    pub job_location: String,
    pub job_company: String,
    pub job_owner_id: Uuid,
}
