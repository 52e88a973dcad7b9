//! Applications domain state and auth backend integration

use crate::ApplicationsRepositories;
use axum::extract::FromRef;
use jobdesk_auth::AuthBackend;

/// Application state for the Applications domain
#[derive(Clone)]
pub struct ApplicationsState {
    pub repos: ApplicationsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<ApplicationsState> for AuthBackend {
    fn from_ref(state: &ApplicationsState) -> Self {
        state.auth.clone()
    }
}
