//! Table management and seed data for the `db-*` commands

use anyhow::Result;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use crate::{
    models::{NewPlanet, NewUser},
    password::hash_password,
    repositories::{PlanetRepository, StorageError, UserRepository},
};

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)
"#;

const CREATE_PLANETS: &str = r#"
CREATE TABLE IF NOT EXISTS planets (
    planet_id SERIAL PRIMARY KEY,
    planet_name TEXT NOT NULL UNIQUE,
    planet_type TEXT NOT NULL,
    home_star TEXT NOT NULL,
    mass DOUBLE PRECISION NOT NULL,
    radius DOUBLE PRECISION NOT NULL,
    distance DOUBLE PRECISION NOT NULL
)
"#;

/// Create both tables if they do not exist yet
pub async fn create_tables(pool: &PgPool) -> DatabaseResult<()> {
    for statement in [CREATE_USERS, CREATE_PLANETS] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(DatabaseError::Query)?;
    }

    info!("Database created!");
    Ok(())
}

/// Drop both tables
pub async fn drop_tables(pool: &PgPool) -> DatabaseResult<()> {
    sqlx::query("DROP TABLE IF EXISTS planets, users")
        .execute(pool)
        .await
        .map_err(DatabaseError::Query)?;

    info!("Database dropped!");
    Ok(())
}

fn seed_planets() -> Vec<NewPlanet> {
    vec![
        NewPlanet {
            planet_name: "Mercury".to_string(),
            planet_type: "Class D".to_string(),
            home_star: "Sol".to_string(),
            mass: 2.258e23,
            radius: 1516.0,
            distance: 35.98e6,
        },
        NewPlanet {
            planet_name: "Venus".to_string(),
            planet_type: "Class K".to_string(),
            home_star: "Sol".to_string(),
            mass: 4.867e24,
            radius: 3760.0,
            distance: 67.24e6,
        },
        NewPlanet {
            planet_name: "Earth".to_string(),
            planet_type: "Class M".to_string(),
            home_star: "Sol".to_string(),
            mass: 5.972e24,
            radius: 3959.0,
            distance: 92.96e6,
        },
    ]
}

/// Email of the user created by [`seed`]
pub const SEED_USER_EMAIL: &str = "test@test.com";
/// Password of the user created by [`seed`]
pub const SEED_USER_PASSWORD: &str = "P@ssw0rd";

/// Insert the sample planets and test user; rows that already exist are kept
pub async fn seed(planets: &dyn PlanetRepository, users: &dyn UserRepository) -> Result<()> {
    for planet in seed_planets() {
        match planets.create(&planet).await {
            Ok(_) => {}
            Err(StorageError::AlreadyExists(name)) => info!("Planet {} already seeded", name),
            Err(e) => return Err(e.into()),
        }
    }

    let test_user = NewUser {
        first_name: "William".to_string(),
        last_name: "Herschel".to_string(),
        email: SEED_USER_EMAIL.to_string(),
        password_hash: hash_password(SEED_USER_PASSWORD)?,
    };

    match users.create(&test_user).await {
        Ok(_) => {}
        Err(StorageError::AlreadyExists(email)) => info!("User {} already seeded", email),
        Err(e) => return Err(e.into()),
    }

    info!("Database seeded!");
    Ok(())
}
