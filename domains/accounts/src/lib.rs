//! Accounts domain: users, role assignment, registration and login

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::User;
pub use repository::{AccountsRepositories, UserRepository};

// Re-export API types
pub use api::routes;
pub use api::AccountsState;
