//! Planet repository backed by PostgreSQL

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{PlanetRepository, StorageError, unique_violation};
use crate::models::{NewPlanet, Planet};

/// Planet repository
#[derive(Clone)]
pub struct PgPlanetRepository {
    pool: PgPool,
}

impl PgPlanetRepository {
    /// Create a new planet repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanetRepository for PgPlanetRepository {
    async fn list(&self) -> Result<Vec<Planet>, StorageError> {
        let planets = sqlx::query_as::<_, Planet>(
            r#"
            SELECT planet_id, planet_name, planet_type, home_star, mass, radius, distance
            FROM planets
            ORDER BY planet_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(planets)
    }

    async fn find_by_id(&self, planet_id: i32) -> Result<Option<Planet>, StorageError> {
        let planet = sqlx::query_as::<_, Planet>(
            r#"
            SELECT planet_id, planet_name, planet_type, home_star, mass, radius, distance
            FROM planets
            WHERE planet_id = $1
            "#,
        )
        .bind(planet_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(planet)
    }

    async fn create(&self, planet: &NewPlanet) -> Result<Planet, StorageError> {
        info!("Creating planet: {}", planet.planet_name);

        sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (planet_name, planet_type, home_star, mass, radius, distance)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING planet_id, planet_name, planet_type, home_star, mass, radius, distance
            "#,
        )
        .bind(&planet.planet_name)
        .bind(&planet.planet_type)
        .bind(&planet.home_star)
        .bind(planet.mass)
        .bind(planet.radius)
        .bind(planet.distance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, &planet.planet_name))
    }

    async fn update(
        &self,
        planet_id: i32,
        planet: &NewPlanet,
    ) -> Result<Option<Planet>, StorageError> {
        info!("Updating planet {}", planet_id);

        sqlx::query_as::<_, Planet>(
            r#"
            UPDATE planets
            SET planet_name = $2, planet_type = $3, home_star = $4,
                mass = $5, radius = $6, distance = $7
            WHERE planet_id = $1
            RETURNING planet_id, planet_name, planet_type, home_star, mass, radius, distance
            "#,
        )
        .bind(planet_id)
        .bind(&planet.planet_name)
        .bind(&planet.planet_type)
        .bind(&planet.home_star)
        .bind(planet.mass)
        .bind(planet.radius)
        .bind(planet.distance)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation(e, &planet.planet_name))
    }

    async fn delete(&self, planet_id: i32) -> Result<bool, StorageError> {
        info!("Deleting planet {}", planet_id);

        let result = sqlx::query("DELETE FROM planets WHERE planet_id = $1")
            .bind(planet_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
