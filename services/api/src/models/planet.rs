//! Planet record and the form payloads that create or overwrite it

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{parse_number, validate_required};

/// Planet entity, serialized as a flat object
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Planet {
    pub planet_id: i32,
    pub planet_name: String,
    pub planet_type: String,
    pub home_star: String,
    pub mass: f64,
    pub radius: f64,
    pub distance: f64,
}

impl Planet {
    pub fn from_new(planet_id: i32, planet: &NewPlanet) -> Self {
        Self {
            planet_id,
            planet_name: planet.planet_name.clone(),
            planet_type: planet.planet_type.clone(),
            home_star: planet.home_star.clone(),
            mass: planet.mass,
            radius: planet.radius,
            distance: planet.distance,
        }
    }
}

/// Validated planet fields, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlanet {
    pub planet_name: String,
    pub planet_type: String,
    pub home_star: String,
    pub mass: f64,
    pub radius: f64,
    pub distance: f64,
}

/// Raw form fields for `/add_planet`
///
/// Numeric fields arrive as text so a malformed number becomes a validation
/// message instead of an extractor rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetForm {
    pub planet_name: String,
    pub planet_type: String,
    pub home_star: String,
    pub mass: String,
    pub radius: String,
    pub distance: String,
}

impl PlanetForm {
    pub fn validate(self) -> Result<NewPlanet, String> {
        validate_required("planet_name", &self.planet_name)?;

        Ok(NewPlanet {
            mass: parse_number("mass", &self.mass)?,
            radius: parse_number("radius", &self.radius)?,
            distance: parse_number("distance", &self.distance)?,
            planet_name: self.planet_name.trim().to_string(),
            planet_type: self.planet_type,
            home_star: self.home_star,
        })
    }
}

/// Raw form fields for `/update_planet`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlanetForm {
    pub planet_id: String,
    #[serde(flatten)]
    pub planet: PlanetForm,
}
