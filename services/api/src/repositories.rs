//! Repositories for database operations
//!
//! Handlers talk to the two traits below. `PgPlanetRepository` and
//! `PgUserRepository` back them with PostgreSQL; `MemoryStore` backs both
//! with process memory for tests and local runs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewPlanet, NewUser, Planet, User};

pub mod memory;
pub mod planet;
pub mod user;

pub use memory::MemoryStore;
pub use planet::PgPlanetRepository;
pub use user::PgUserRepository;

/// Error type for storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique key (planet name, user email) is already taken
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Map a unique-constraint violation to `AlreadyExists`
pub(crate) fn unique_violation(err: sqlx::Error, key: &str) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::AlreadyExists(key.to_string())
        }
        _ => StorageError::Database(err),
    }
}

/// Storage for the planet catalog
#[async_trait]
pub trait PlanetRepository: Send + Sync {
    /// All planets in ascending id order
    async fn list(&self) -> Result<Vec<Planet>, StorageError>;

    async fn find_by_id(&self, planet_id: i32) -> Result<Option<Planet>, StorageError>;

    /// Insert a planet; fails with `AlreadyExists` when the name is taken
    async fn create(&self, planet: &NewPlanet) -> Result<Planet, StorageError>;

    /// Overwrite every field of a planet; `None` when the id is unknown
    async fn update(
        &self,
        planet_id: i32,
        planet: &NewPlanet,
    ) -> Result<Option<Planet>, StorageError>;

    /// Remove a planet; `false` when the id is unknown
    async fn delete(&self, planet_id: i32) -> Result<bool, StorageError>;
}

/// Storage for registered users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; fails with `AlreadyExists` when the email is taken
    async fn create(&self, user: &NewUser) -> Result<User, StorageError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;

    /// Replace a user's password hash; `false` when the email is unknown
    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError>;
}
