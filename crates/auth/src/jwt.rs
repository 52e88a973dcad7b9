//! JWT issuance, validation, and token extraction helpers

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Issue a signed access token for a user
pub fn issue_token(config: &AuthConfig, user_id: Uuid, email: &str) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: Some(email.to_string()),
        iat: now as u64,
        exp: (now + config.token_ttl_secs) as u64,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_ref());

    encode(&header, &claims, &encoding_key).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode JWT");
        AuthError::TokenIssueError
    })
}

/// Validate an access token and return its claims
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);

    if let Some(aud) = &config.audience {
        validation.set_audience(&[aud]);
    } else {
        validation.validate_aud = false;
    }

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}
