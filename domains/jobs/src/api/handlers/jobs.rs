//! Job posting API handlers
//!
//! Authorization decisions go through the policy engine; what the
//! handlers add is result-set scoping (whose jobs) and field
//! visibility (which columns), both keyed off the caller's role set.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::JobsState;
use crate::domain::entities::{shape_jobs_for, Job, JobListing, JobPatch, JobSearchFilter};
use jobdesk_auth::{authorize, Action, AuthUser, OptionalAuthUser, Role};
use jobdesk_common::{Error, Result};

/// Request for creating a job posting
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1))]
    pub location: String,

    #[validate(length(min = 1, max = 255))]
    pub company: String,
}

/// Request for partially updating a job posting
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub company: Option<String>,
}

impl From<UpdateJobRequest> for JobPatch {
    fn from(request: UpdateJobRequest) -> Self {
        JobPatch {
            title: request.title,
            description: request.description,
            location: request.location,
            company: request.company,
        }
    }
}

/// List job postings, shaped by the caller's roles
///
/// **GET /v1/jobs**
///
/// Admin sees every job with every column; an employer sees its own
/// postings; everyone else sees all jobs attribute-restricted to the
/// public subset.
pub async fn list_jobs(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
) -> Result<Json<Vec<JobListing>>> {
    let jobs = if principal.has_role(Role::Admin) {
        authorize(&principal, Action::ListJobsAdminView, None)?;
        state.repos.jobs.list_all().await?
    } else if principal.has_role(Role::Employer) {
        authorize(&principal, Action::ListJobsOwn, None)?;
        state.repos.jobs.list_by_owner(principal.id).await?
    } else {
        authorize(&principal, Action::ListJobsPublic, None)?;
        state.repos.jobs.list_all().await?
    };

    Ok(Json(shape_jobs_for(&principal, jobs)))
}

/// Create a job posting
///
/// **POST /v1/jobs**
///
/// Employer or admin only; the caller becomes the owner.
pub async fn create_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Json(request): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>)> {
    authorize(&principal, Action::CreateJob, None)?;

    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    let job = Job::new(
        request.title,
        request.description,
        request.location,
        request.company,
        principal.id,
    )?;
    let created = state.repos.jobs.create(&job).await?;

    tracing::info!(job_id = %created.id, owner_id = %created.owner_id, "Job created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get one job posting
///
/// **GET /v1/jobs/{id}**
pub async fn get_job(
    AuthUser(_principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>> {
    let job = state
        .repos
        .jobs
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    Ok(Json(job))
}

/// Partially update a job posting
///
/// **PATCH /v1/jobs/{id}**
///
/// Owner or admin only; absent fields keep their prior value.
pub async fn update_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateJobRequest>,
) -> Result<Json<Job>> {
    let mut job = state
        .repos
        .jobs
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    authorize(&principal, Action::UpdateJob, Some(job.owner_id))?;

    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    JobPatch::from(request).apply_to(&mut job);
    let updated = state.repos.jobs.update(&job).await?;

    Ok(Json(updated))
}

/// Delete a job posting
///
/// **DELETE /v1/jobs/{id}**
///
/// Owner or admin only. Irreversible.
pub async fn delete_job(
    AuthUser(principal): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let job = state
        .repos
        .jobs
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    authorize(&principal, Action::DeleteJob, Some(job.owner_id))?;

    state.repos.jobs.delete(id).await?;

    tracing::info!(job_id = %id, "Job deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Search job postings
///
/// **GET /v1/jobs/search**
///
/// Open by default; `search_requires_auth` turns authentication on for
/// deployments that route search behind the auth group.
pub async fn search_jobs(
    OptionalAuthUser(principal): OptionalAuthUser,
    State(state): State<JobsState>,
    Query(filter): Query<JobSearchFilter>,
) -> Result<Json<Vec<Job>>> {
    if state.search_requires_auth && principal.is_none() {
        return Err(Error::Authentication(
            "Authentication required for search".to_string(),
        ));
    }

    if let Some(principal) = &principal {
        authorize(principal, Action::SearchJobs, None)?;
    }

    let jobs = state.repos.jobs.search(&filter).await?;
    Ok(Json(jobs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_job_request_validation() {
        let valid = CreateJobRequest {
            title: "Backend Developer".to_string(),
            description: "Build the backend".to_string(),
            location: "Casablanca".to_string(),
            company: "TechCorp".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateJobRequest {
            title: String::new(),
            description: "Build the backend".to_string(),
            location: "Casablanca".to_string(),
            company: "TechCorp".to_string(),
        };
        assert!(empty_title.validate().is_err());

        let long_company = CreateJobRequest {
            title: "Backend Developer".to_string(),
            description: "Build the backend".to_string(),
            location: "Casablanca".to_string(),
            company: "x".repeat(256),
        };
        assert!(long_company.validate().is_err());
    }

    #[test]
    fn test_update_job_request_validation() {
        let valid = UpdateJobRequest {
            title: Some("Senior Backend Developer".to_string()),
            description: None,
            location: None,
            company: None,
        };
        assert!(valid.validate().is_ok());

        let empty_field = UpdateJobRequest {
            title: Some(String::new()),
            description: None,
            location: None,
            company: None,
        };
        assert!(empty_field.validate().is_err());
    }

    #[test]
    fn test_update_request_to_patch_keeps_absent_fields_none() {
        let request = UpdateJobRequest {
            title: Some("New title".to_string()),
            description: None,
            location: None,
            company: None,
        };
        let patch = JobPatch::from(request);
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.description.is_none());
        assert!(patch.location.is_none());
        assert!(patch.company.is_none());
    }
}
