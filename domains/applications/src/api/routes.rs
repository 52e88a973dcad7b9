//! Route definitions for the Applications domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::applications;
use super::state::ApplicationsState;

/// Create all Applications domain API routes
pub fn routes() -> Router<ApplicationsState> {
    Router::new()
        .route("/v1/jobs/{job_id}/apply", post(applications::apply_to_job))
        .route(
            "/v1/applications/mine",
            get(applications::list_my_applications),
        )
        .route(
            "/v1/applications/employer",
            get(applications::list_employer_applications),
        )
        .route("/v1/applications", get(applications::list_all_applications))
}
