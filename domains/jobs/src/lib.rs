//! Jobs domain: job postings, role-scoped listing, search

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{shape_jobs_for, Job, JobListing, JobPatch, JobSearchFilter, PublicJob};
pub use repository::{JobRepository, JobsRepositories};

// Re-export API types
pub use api::routes;
pub use api::JobsState;
