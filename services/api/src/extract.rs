//! Request extractors

use axum::{
    Form, Json,
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Media type comparison ignores case and any parameters such as `charset`
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

/// Deserializes the body as JSON when the request says so, and as an
/// url-encoded form otherwise
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_media_type);

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}
