//! Introductory endpoints that need no storage

use axum::{Json, extract::Query, extract::rejection::QueryRejection, http::StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::{error::ApiResult, models::MessageResponse};

/// Query for `/parameters`
#[derive(Debug, Deserialize)]
pub struct ParametersQuery {
    pub name: String,
    pub age: i32,
}

pub async fn hello_world() -> &'static str {
    "Hello World!"
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "planetary-api"
    }))
}

pub async fn super_simple() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Hello from the Planetary API. Planets are so much fun.",
    ))
}

pub async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("That resource was not found")),
    )
}

pub async fn parameters(
    query: Result<Query<ParametersQuery>, QueryRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Query(ParametersQuery { name, age }) = query?;

    if age < 18 {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(MessageResponse::new(format!(
                "Sorry {}, you are not old enough.",
                name
            ))),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(format!(
            "Welcome {}, you are old enough.",
            name
        ))),
    ))
}
