//! Request handlers, one per route.
//!
//! Each handler validates the body (when there is one) outside the database
//! session, then does its reads and writes inside `AppState::run`.

use crate::error::{ApiError, LINK_NOT_FOUND_MESSAGE};
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::schema::SCHEMA_ERROR_KEY;
use storefront_core::{EntityKind, OrderId, ProductId, Schema, ValidationError};

pub mod orders;
pub mod products;
pub mod users;

/// `{"message": ..}` body used for confirmations and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unwraps an id path segment. A segment that does not parse as an id names
/// a `kind` that cannot exist, so it is a 404 like any other missing row.
pub(crate) fn entity_id<T>(
    path: Result<Path<T>, PathRejection>,
    kind: EntityKind,
) -> Result<T, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(PathRejection::FailedToDeserializePathParams(_)) => Err(ApiError::not_found(kind)),
        Err(other) => Err(ApiError::Internal(other.body_text())),
    }
}

/// `entity_id` for the order/product link routes.
pub(crate) fn link_ids(
    path: Result<Path<(OrderId, ProductId)>, PathRejection>,
) -> Result<(OrderId, ProductId), ApiError> {
    match path {
        Ok(Path(ids)) => Ok(ids),
        Err(PathRejection::FailedToDeserializePathParams(_)) => {
            Err(ApiError::NotFound(LINK_NOT_FOUND_MESSAGE.to_string()))
        }
        Err(other) => Err(ApiError::Internal(other.body_text())),
    }
}

/// Loads a JSON request body through `S`. Bodies not labelled
/// `application/json` (or `application/*+json`) are refused.
pub(crate) fn json_payload<S: Schema>(
    headers: &HeaderMap,
    body: &[u8],
) -> Result<S::Payload, ValidationError> {
    if !is_json_content_type(headers) {
        return Err(ValidationError::single(
            SCHEMA_ERROR_KEY,
            "Content-Type must be application/json.",
        ));
    }
    S::load_bytes(body)
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(mime) = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
    else {
        return false;
    };
    let mime = mime.trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: storefront_core::core_version(),
    })
}

#[cfg(test)]
mod tests {
    use super::is_json_content_type;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{HeaderMap, HeaderValue};

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn json_content_types_are_recognized() {
        assert!(is_json_content_type(&with_content_type("application/json")));
        assert!(is_json_content_type(&with_content_type(
            "Application/JSON; charset=utf-8"
        )));
        assert!(is_json_content_type(&with_content_type(
            "application/merge-patch+json"
        )));
    }

    #[test]
    fn other_or_missing_content_types_are_not_json() {
        assert!(!is_json_content_type(&with_content_type("text/plain")));
        assert!(!is_json_content_type(&with_content_type("application/jsonx")));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }
}
