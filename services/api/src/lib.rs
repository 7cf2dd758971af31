//! Planetary API
//!
//! A small REST service exposing a catalog of planets and user
//! registration/authentication. Reads are public; adding, updating and
//! removing planets requires a bearer token obtained from `/login`.

pub mod error;
pub mod extract;
pub mod jwt;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
