//! Jobs domain state and auth backend integration

use crate::JobsRepositories;
use axum::extract::FromRef;
use jobdesk_auth::AuthBackend;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub repos: JobsRepositories,
    pub auth: AuthBackend,
    /// Whether /v1/jobs/search requires an authenticated caller
    pub search_requires_auth: bool,
}

impl FromRef<JobsState> for AuthBackend {
    fn from_ref(state: &JobsState) -> Self {
        state.auth.clone()
    }
}
