//! Domain entities for the Jobs domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobdesk_common::{Error, Result};
use jobdesk_auth::{Principal, Role};

/// Job posting entity.
///
/// `owner_id` references the employer (or admin) account that created
/// the posting and drives ownership-based authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job posting with validation
    pub fn new(
        title: String,
        description: String,
        location: String,
        company: String,
        owner_id: Uuid,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > 255 {
            return Err(Error::Validation(
                "Title must be 1-255 characters".to_string(),
            ));
        }
        if description.is_empty() {
            return Err(Error::Validation("Description is required".to_string()));
        }
        if location.is_empty() {
            return Err(Error::Validation("Location is required".to_string()));
        }
        if company.is_empty() || company.len() > 255 {
            return Err(Error::Validation(
                "Company must be 1-255 characters".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Job {
            id: Uuid::new_v4(),
            title,
            description,
            location,
            company,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Attribute-restricted view of a job for non-privileged principals.
///
/// The owner id and timestamps are withheld.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicJob {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
}

impl From<Job> for PublicJob {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            company: job.company,
        }
    }
}

/// A listing entry shaped by the caller's roles
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum JobListing {
    Full(Job),
    Public(PublicJob),
}

/// Shape jobs for a principal per the field-visibility rule: privileged
/// principals (admin, employer) see every column; everyone else sees
/// the public subset, including for jobs they happen to own.
pub fn shape_jobs_for(principal: &Principal, jobs: Vec<Job>) -> Vec<JobListing> {
    let privileged = principal.has_role(Role::Admin) || principal.has_role(Role::Employer);

    jobs.into_iter()
        .map(|job| {
            if privileged {
                JobListing::Full(job)
            } else {
                JobListing::Public(job.into())
            }
        })
        .collect()
}

/// Partial update to a job posting. Absent fields keep their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl JobPatch {
    /// Apply the present fields onto a loaded job
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(title) = &self.title {
            job.title = title.clone();
        }
        if let Some(description) = &self.description {
            job.description = description.clone();
        }
        if let Some(location) = &self.location {
            job.location = location.clone();
        }
        if let Some(company) = &self.company {
            job.company = company.clone();
        }
        job.updated_at = Utc::now();
    }
}

/// Optional case-insensitive substring filters for job search,
/// AND-combined when several are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchFilter {
    pub title: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl JobSearchFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.location.is_none() && self.company.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_job(owner_id: Uuid) -> Job {
        Job::new(
            "Backend Developer".to_string(),
            "Build the backend".to_string(),
            "Casablanca".to_string(),
            "TechCorp".to_string(),
            owner_id,
        )
        .unwrap()
    }

    fn principal_with(roles: &[Role]) -> Principal {
        Principal::new(
            Uuid::new_v4(),
            "test@example.com".to_string(),
            "Test User".to_string(),
            roles.iter().copied().collect::<HashSet<_>>(),
        )
    }

    #[test]
    fn test_job_new_validation() {
        let owner = Uuid::new_v4();
        assert!(Job::new(
            String::new(),
            "desc".to_string(),
            "loc".to_string(),
            "co".to_string(),
            owner
        )
        .is_err());
        assert!(Job::new(
            "title".to_string(),
            String::new(),
            "loc".to_string(),
            "co".to_string(),
            owner
        )
        .is_err());
        assert!(Job::new(
            "t".repeat(256),
            "desc".to_string(),
            "loc".to_string(),
            "co".to_string(),
            owner
        )
        .is_err());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut job = sample_job(Uuid::new_v4());
        let before_description = job.description.clone();

        let patch = JobPatch {
            title: Some("Senior Backend Developer".to_string()),
            location: Some("Rabat".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut job);

        assert_eq!(job.title, "Senior Backend Developer");
        assert_eq!(job.location, "Rabat");
        // Absent fields keep their prior value
        assert_eq!(job.description, before_description);
        assert_eq!(job.company, "TechCorp");
    }

    #[test]
    fn test_empty_patch_changes_nothing_but_timestamp() {
        let mut job = sample_job(Uuid::new_v4());
        let before = job.clone();

        JobPatch::default().apply_to(&mut job);

        assert_eq!(job.title, before.title);
        assert_eq!(job.description, before.description);
        assert_eq!(job.location, before.location);
        assert_eq!(job.company, before.company);
    }

    #[test]
    fn test_public_view_withholds_owner() {
        let job = sample_job(Uuid::new_v4());
        let public = PublicJob::from(job.clone());

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("owner_id"));
        assert!(!json.contains(&job.owner_id.to_string()));
        assert!(json.contains("Backend Developer"));
    }

    #[test]
    fn test_shape_jobs_public_for_plain_user_even_when_owner() {
        let user = principal_with(&[Role::User]);
        // The principal owns this job, but without admin/employer the
        // listing is still attribute-restricted
        let jobs = vec![sample_job(user.id)];

        let shaped = shape_jobs_for(&user, jobs);
        let json = serde_json::to_string(&shaped).unwrap();
        assert!(!json.contains("owner_id"));
    }

    #[test]
    fn test_shape_jobs_full_for_admin() {
        let admin = principal_with(&[Role::Admin]);
        let jobs = vec![sample_job(Uuid::new_v4())];

        let shaped = shape_jobs_for(&admin, jobs);
        let json = serde_json::to_string(&shaped).unwrap();
        assert!(json.contains("owner_id"));
    }

    #[test]
    fn test_search_filter_is_empty() {
        assert!(JobSearchFilter::default().is_empty());
        assert!(!JobSearchFilter {
            title: Some("Dev".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
