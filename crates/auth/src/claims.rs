//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by a Jobdesk access token.
///
/// Roles are deliberately absent: they are loaded from the database on
/// every authenticated request so that role changes take effect without
/// waiting for token expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: Option<String>,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    /// Issuer, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Audience, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}
