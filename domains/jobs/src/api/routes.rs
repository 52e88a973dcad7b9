//! Route definitions for the Jobs domain API

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::jobs;
use super::state::JobsState;

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .route("/v1/jobs", get(jobs::list_jobs))
        .route("/v1/jobs", post(jobs::create_job))
        .route("/v1/jobs/search", get(jobs::search_jobs))
        .route("/v1/jobs/{id}", get(jobs::get_job))
        .route("/v1/jobs/{id}", patch(jobs::update_job))
        .route("/v1/jobs/{id}", delete(jobs::delete_job))
}
