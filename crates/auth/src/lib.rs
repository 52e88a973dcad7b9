//! Authentication and authorization for Jobdesk
//!
//! JWT validation and issuance, the principal model (a user plus its
//! role set), the role-based authorization policy engine, and axum
//! extractors for authenticated routes.

pub mod backend;
pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
pub mod jwt;
pub mod policy;
pub mod principal;

pub use backend::{AuthBackend, AuthIdentity};
pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{AuthUser, OptionalAuthUser};
pub use jwt::{issue_token, validate_token};
pub use policy::{authorize, decide, Action, Decision};
pub use principal::{Principal, Role};
