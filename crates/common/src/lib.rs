//! Shared foundation for the Jobdesk workspace
//!
//! Error taxonomy, environment configuration, password hashing, and the
//! database pool helper used by every domain crate.

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;

pub use config::Config;
pub use crypto::{hash_password, verify_password};
pub use db::connect_pool;
pub use error::{Error, Result};
