//! Route definitions for the Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::auth;
use super::state::AccountsState;

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .route("/v1/auth/register", post(auth::register))
        .route("/v1/auth/register/employer", post(auth::register_employer))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/whoami", get(auth::whoami))
}
