//! Repository implementations for the Applications domain

pub mod applications;

use sqlx::PgPool;

pub use applications::ApplicationRepository;

/// Combined repository access for the Applications domain
#[derive(Clone)]
pub struct ApplicationsRepositories {
    pub applications: ApplicationRepository,
}

impl ApplicationsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            applications: ApplicationRepository::new(pool),
        }
    }
}
