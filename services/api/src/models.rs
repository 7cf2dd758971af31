//! API models for records, request payloads and response bodies

use serde::Serialize;

pub mod planet;
pub mod user;

pub use planet::{NewPlanet, Planet, PlanetForm, UpdatePlanetForm};
pub use user::{
    LoginRequest, LoginResponse, NewUser, RegisterForm, ResetPasswordRequest, User, UserResponse,
};

/// Body used by every endpoint that only reports an outcome
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
