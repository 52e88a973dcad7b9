//! Application workflow API handlers
//!
//! Applying is open to any authenticated principal; the employer and
//! admin listings are role-gated through the policy engine, and the
//! employer listing is additionally scoped to jobs the caller owns.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::api::state::ApplicationsState;
use crate::domain::entities::{Application, ApplicationWithDetails, ApplicationWithJob};
use jobdesk_auth::{authorize, Action, AuthUser};
use jobdesk_common::{Error, Result};

/// Request for applying to a job
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
}

/// Apply to a job posting
///
/// **POST /v1/jobs/{job_id}/apply**
///
/// The job must exist; a second application to the same job conflicts.
/// The pre-check gives the common case a clean answer, and the unique
/// constraint settles concurrent submissions.
pub async fn apply_to_job(
    AuthUser(principal): AuthUser,
    State(state): State<ApplicationsState>,
    Path(job_id): Path<Uuid>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>)> {
    authorize(&principal, Action::ApplyToJob, None)?;

    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    if !state.repos.applications.job_exists(job_id).await? {
        return Err(Error::NotFound("Job not found".to_string()));
    }

    if state
        .repos
        .applications
        .find_for_user_and_job(principal.id, job_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict("Already applied to this job".to_string()));
    }

    let application = Application::new(principal.id, job_id, request.cover_letter);
    let created = state.repos.applications.create(&application).await?;

    tracing::info!(
        application_id = %created.id,
        job_id = %job_id,
        user_id = %principal.id,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// List the caller's own applications
///
/// **GET /v1/applications/mine**
pub async fn list_my_applications(
    AuthUser(principal): AuthUser,
    State(state): State<ApplicationsState>,
) -> Result<Json<Vec<ApplicationWithJob>>> {
    authorize(&principal, Action::ListOwnApplications, None)?;

    let applications = state.repos.applications.list_for_user(principal.id).await?;
    Ok(Json(applications))
}

/// List applications to jobs the caller owns
///
/// **GET /v1/applications/employer**
///
/// Employer or admin only. The result set is scoped to the caller's
/// own postings; admins wanting everything use the admin listing.
pub async fn list_employer_applications(
    AuthUser(principal): AuthUser,
    State(state): State<ApplicationsState>,
) -> Result<Json<Vec<ApplicationWithDetails>>> {
    authorize(&principal, Action::ListEmployerApplications, None)?;

    let applications = state
        .repos
        .applications
        .list_for_job_owner(principal.id)
        .await?;
    Ok(Json(applications))
}

/// List every application
///
/// **GET /v1/applications**
///
/// Admin only.
pub async fn list_all_applications(
    AuthUser(principal): AuthUser,
    State(state): State<ApplicationsState>,
) -> Result<Json<Vec<ApplicationWithDetails>>> {
    authorize(&principal, Action::ListAllApplications, None)?;

    let applications = state.repos.applications.list_all().await?;
    Ok(Json(applications))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request_validation() {
        assert!(ApplyRequest::default().validate().is_ok());

        let valid = ApplyRequest {
            cover_letter: Some("Hi".to_string()),
        };
        assert!(valid.validate().is_ok());

        let too_long = ApplyRequest {
            cover_letter: Some("x".repeat(5001)),
        };
        assert!(too_long.validate().is_err());
    }
}
