//! Registration and login API handlers
//!
//! Registration seeds exactly one role: `user` via /register,
//! `employer` via /register/employer. Admin accounts are seeded out of
//! band, never through the API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::state::AccountsState;
use crate::domain::entities::User;
use jobdesk_auth::{AuthUser, Role};
use jobdesk_common::{hash_password, verify_password, Error, Result};

/// Request for registering an account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6))]
    pub password: String,

    /// Optional confirmation; must equal `password` when present
    pub password_confirmation: Option<String>,
}

/// When a confirmation was sent, it has to match the password.
fn check_password_confirmation(request: &RegisterRequest) -> Result<()> {
    match &request.password_confirmation {
        Some(confirmation) if confirmation != &request.password => Err(Error::Validation(
            "Password confirmation does not match".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Public view of a user for API responses
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Token + user payload returned by register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
    pub roles: Vec<Role>,
}

async fn register_with_role(
    state: &AccountsState,
    request: RegisterRequest,
    role: Role,
) -> Result<AuthResponse> {
    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;
    check_password_confirmation(&request)?;

    let user = User::new(request.name, request.email, hash_password(&request.password))?;
    let created = state.repos.users.create(&user, role).await?;

    let token = state
        .auth
        .issue_token(created.id, &created.email)
        .map_err(|_| Error::Internal("Failed to issue token".to_string()))?;

    tracing::info!(user_id = %created.id, role = %role, "Account registered");

    Ok(AuthResponse {
        token,
        user: created.into(),
        roles: vec![role],
    })
}

/// Register a regular account
///
/// **POST /v1/auth/register**
pub async fn register(
    State(state): State<AccountsState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let response = register_with_role(&state, request, Role::User).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Register an employer account
///
/// **POST /v1/auth/register/employer**
pub async fn register_employer(
    State(state): State<AccountsState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let response = register_with_role(&state, request, Role::Employer).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in with email and password
///
/// **POST /v1/auth/login**
///
/// A missing account and a wrong password produce the same response so
/// the endpoint cannot be used to probe registered emails.
pub async fn login(
    State(state): State<AccountsState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    request
        .validate()
        .map_err(|e| Error::Validation(format!("Validation failed: {}", e)))?;

    let user = state
        .repos
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| Error::Authentication("Invalid credentials".to_string()))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(Error::Authentication("Invalid credentials".to_string()));
    }

    let roles = state.repos.users.roles_for_user(user.id).await?;

    let token = state
        .auth
        .issue_token(user.id, &user.email)
        .map_err(|_| Error::Internal("Failed to issue token".to_string()))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
        roles,
    }))
}

/// Current principal payload for whoami
#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub roles: Vec<&'static str>,
}

/// Inspect the current principal
///
/// **GET /v1/auth/whoami**
pub async fn whoami(AuthUser(principal): AuthUser) -> Json<WhoamiResponse> {
    Json(WhoamiResponse {
        id: principal.id,
        email: principal.email.clone(),
        name: principal.name.clone(),
        roles: principal.role_names(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        // Valid request
        let valid = RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            password_confirmation: None,
        };
        assert!(valid.validate().is_ok());

        // Invalid email
        let bad_email = RegisterRequest {
            name: "John Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            password_confirmation: None,
        };
        assert!(bad_email.validate().is_err());

        // Password too short
        let short_password = RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "12345".to_string(),
            password_confirmation: None,
        };
        assert!(short_password.validate().is_err());

        // Empty name
        let empty_name = RegisterRequest {
            name: String::new(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            password_confirmation: None,
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_password_confirmation_must_match_when_present() {
        let base = |confirmation: Option<&str>| RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            password_confirmation: confirmation.map(str::to_string),
        };

        // Absent confirmation passes
        assert!(check_password_confirmation(&base(None)).is_ok());

        // Matching confirmation passes
        assert!(check_password_confirmation(&base(Some("password123"))).is_ok());

        // Mismatch is a validation failure
        let err = check_password_confirmation(&base(Some("password124"))).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_password = LoginRequest {
            email: "john@example.com".to_string(),
            password: String::new(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_auth_response_omits_password_hash() {
        let user = User::new(
            "John Doe".to_string(),
            "john@example.com".to_string(),
            "salt:hash".to_string(),
        )
        .unwrap();

        let response = AuthResponse {
            token: "token".to_string(),
            user: user.into(),
            roles: vec![Role::User],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("john@example.com"));
        assert!(json.contains("\"user\""));
        assert!(!json.contains("password"));
        assert!(!json.contains("salt:hash"));
    }
}
