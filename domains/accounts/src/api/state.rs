//! Accounts domain state and auth backend integration

use crate::AccountsRepositories;
use axum::extract::FromRef;
use jobdesk_auth::AuthBackend;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub repos: AccountsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<AccountsState> for AuthBackend {
    fn from_ref(state: &AccountsState) -> Self {
        state.auth.clone()
    }
}
