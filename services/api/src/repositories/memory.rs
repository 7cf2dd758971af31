//! In-memory storage backend
//!
//! Implements both repository traits over maps guarded by async locks. Each
//! uniqueness check and the write it guards happen under one write lock, so
//! concurrent inserts of the same name or email cannot both succeed. Data is
//! lost on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use super::{PlanetRepository, StorageError, UserRepository};
use crate::models::{NewPlanet, NewUser, Planet, User};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory planet and user store
#[derive(Debug, Default)]
pub struct MemoryStore {
    planets: RwLock<Table<Planet>>,
    users: RwLock<Table<User>>,
}

impl MemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanetRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Planet>, StorageError> {
        let planets = self.planets.read().await;
        Ok(planets.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, planet_id: i32) -> Result<Option<Planet>, StorageError> {
        let planets = self.planets.read().await;
        Ok(planets.rows.get(&planet_id).cloned())
    }

    async fn create(&self, planet: &NewPlanet) -> Result<Planet, StorageError> {
        let mut planets = self.planets.write().await;

        if planets
            .rows
            .values()
            .any(|p| p.planet_name == planet.planet_name)
        {
            return Err(StorageError::AlreadyExists(planet.planet_name.clone()));
        }

        let planet_id = planets.next_id();
        let created = Planet::from_new(planet_id, planet);
        planets.rows.insert(planet_id, created.clone());
        info!(planet_id, name = %created.planet_name, "Stored planet");

        Ok(created)
    }

    async fn update(
        &self,
        planet_id: i32,
        planet: &NewPlanet,
    ) -> Result<Option<Planet>, StorageError> {
        let mut planets = self.planets.write().await;

        if !planets.rows.contains_key(&planet_id) {
            return Ok(None);
        }

        if planets
            .rows
            .values()
            .any(|p| p.planet_id != planet_id && p.planet_name == planet.planet_name)
        {
            return Err(StorageError::AlreadyExists(planet.planet_name.clone()));
        }

        let updated = Planet::from_new(planet_id, planet);
        planets.rows.insert(planet_id, updated.clone());

        Ok(Some(updated))
    }

    async fn delete(&self, planet_id: i32) -> Result<bool, StorageError> {
        let mut planets = self.planets.write().await;
        Ok(planets.rows.remove(&planet_id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> Result<User, StorageError> {
        let mut users = self.users.write().await;

        if users.rows.values().any(|u| u.email == new_user.email) {
            return Err(StorageError::AlreadyExists(new_user.email.clone()));
        }

        let id = users.next_id();
        let user = User {
            id,
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
        };
        users.rows.insert(id, user.clone());
        info!(id, email = %user.email, "Stored user");

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn update_password(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut users = self.users.write().await;

        match users.rows.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
