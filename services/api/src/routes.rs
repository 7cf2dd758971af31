//! API service routes

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::{middleware::auth_middleware, state::AppState};

pub mod intro;
pub mod planets;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/add_planet", post(planets::add_planet))
        .route("/update_planet", put(planets::update_planet))
        .route("/remove_planet/:planet_id", delete(planets::remove_planet))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(intro::hello_world))
        .route("/health", get(intro::health_check))
        .route("/super_simple", get(intro::super_simple))
        .route("/not_found", get(intro::not_found))
        .route("/parameters", get(intro::parameters))
        .route("/planets", get(planets::list_planets))
        .route("/planet_details/:planet_id", get(planets::planet_details))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/retrieve_password/:email", get(users::retrieve_password))
        .route("/reset_password", post(users::reset_password))
        .merge(protected_routes)
        .with_state(state)
}
