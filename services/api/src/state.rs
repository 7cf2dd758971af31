//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    jwt::JwtService,
    mail::Mailer,
    repositories::{
        MemoryStore, PgPlanetRepository, PgUserRepository, PlanetRepository, UserRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub planet_repository: Arc<dyn PlanetRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub jwt_service: JwtService,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, jwt_service: JwtService, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            planet_repository: Arc::new(PgPlanetRepository::new(pool.clone())),
            user_repository: Arc::new(PgUserRepository::new(pool)),
            jwt_service,
            mailer,
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(jwt_service: JwtService, mailer: Arc<dyn Mailer>) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            planet_repository: store.clone(),
            user_repository: store,
            jwt_service,
            mailer,
        }
    }
}
