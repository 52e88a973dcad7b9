//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;
use crate::principal::Principal;

/// Authenticated principal extractor
#[derive(Debug)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let backend = AuthBackend::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = extract_bearer_token(auth_header)?;
        let principal = backend.authenticate_token(&token).await?;

        Ok(AuthUser(principal))
    }
}

/// Optional-authentication extractor.
///
/// Yields `None` when no Authorization header is present; a header that
/// is present but invalid still rejects with 401. Used by routes whose
/// authentication requirement is a configuration flag (job search).
#[derive(Debug)]
pub struct OptionalAuthUser(pub Option<Principal>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(OptionalAuthUser(None));
        };

        let backend = AuthBackend::from_ref(state);
        let token = extract_bearer_token(auth_header)?;
        let principal = backend.authenticate_token(&token).await?;

        Ok(OptionalAuthUser(Some(principal)))
    }
}
