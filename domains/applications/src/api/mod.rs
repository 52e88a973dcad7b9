//! API layer for the Applications domain

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::routes;
pub use state::ApplicationsState;
