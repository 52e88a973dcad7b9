//! Jobdesk application composition root
//!
//! Composes all domain routers into a single application.

use axum::Router;
use jobdesk_accounts::{AccountsRepositories, AccountsState};
use jobdesk_applications::{ApplicationsRepositories, ApplicationsState};
use jobdesk_auth::{AuthBackend, AuthConfig};
use jobdesk_common::Config;
use jobdesk_jobs::{JobsRepositories, JobsState};
use sqlx::PgPool;

/// Create the main application router with all routes
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let auth_config = AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
        token_ttl_secs: config.token_ttl_secs,
    };
    let auth = AuthBackend::new(pool.clone(), auth_config);

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let jobs_state = JobsState {
        repos: JobsRepositories::new(pool.clone()),
        auth: auth.clone(),
        search_requires_auth: config.search_requires_auth,
    };

    let applications_state = ApplicationsState {
        repos: ApplicationsRepositories::new(pool),
        auth,
    };

    // Build router — compose domain routers with shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Jobdesk API v0.1.0" }))
        .merge(jobdesk_accounts::routes().with_state(accounts_state))
        .merge(jobdesk_jobs::routes().with_state(jobs_state))
        .merge(jobdesk_applications::routes().with_state(applications_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
