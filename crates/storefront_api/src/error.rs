//! HTTP error taxonomy and status-code mapping.
//!
//! # Invariants
//! - Missing path entities are always 404.
//! - Unexpected failures are 500 with a fixed message; details go to the log only.

use crate::handlers::MessageBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use storefront_core::{EntityKind, RepoError, ValidationError};
use tokio::task::JoinError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const LINK_NOT_FOUND_MESSAGE: &str = "Order or Product not found";

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with a field map.
    Validation(ValidationError),
    /// 400 with a message.
    BadRequest(String),
    /// 404 with a message.
    NotFound(String),
    /// 409 with a message.
    Conflict(String),
    /// 500; the detail is logged, never returned.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 404 `"<Kind> not found"`.
    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound(format!("{} not found", kind.label()))
    }

    /// Maps errors of the order/product link routes, where either side
    /// missing reads as one combined not-found.
    pub fn from_link_error(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { .. } => Self::NotFound(LINK_NOT_FOUND_MESSAGE.to_string()),
            other => other.into(),
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => f.write_str(message),
        }
    }
}

impl Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, .. } => Self::not_found(kind),
            RepoError::Duplicate { field: "email" } => {
                Self::Conflict("Email already registered".to_string())
            }
            RepoError::Duplicate { field } => Self::Conflict(format!("Duplicate value for {field}")),
            RepoError::InUse {
                kind: EntityKind::User,
                ..
            } => Self::Conflict("User has existing orders".to_string()),
            RepoError::InUse { kind, .. } => {
                Self::Conflict(format!("{} is still referenced", kind.label()))
            }
            RepoError::LinkExists { .. } => Self::BadRequest("Product already in order".to_string()),
            RepoError::LinkMissing { .. } => Self::BadRequest("Product not in order".to_string()),
            err @ (RepoError::Db(_) | RepoError::InvalidData(_)) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::Internal(format!("request task failed: {value}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Validation(errors) => (status, Json(errors)).into_response(),
            Self::Internal(detail) => {
                error!("event=http_error module=api status=error error={detail}");
                (status, Json(MessageBody::new(INTERNAL_ERROR_MESSAGE))).into_response()
            }
            Self::BadRequest(message) | Self::NotFound(message) | Self::Conflict(message) => {
                (status, Json(MessageBody::new(message))).into_response()
            }
        }
    }
}
