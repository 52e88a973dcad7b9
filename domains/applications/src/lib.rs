//! Applications domain: candidacies linking users to jobs

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Application, ApplicationWithDetails, ApplicationWithJob};
pub use repository::{ApplicationRepository, ApplicationsRepositories};

// Re-export API types
pub use api::routes;
pub use api::ApplicationsState;
