//! Error types for booking-web
//!
//! Every handler error becomes a rendered HTML page: missing entities get
//! the not-found page, everything else the server-error page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use booking_common::EntityKind;
use thiserror::Error;
use tracing::error;

use crate::render;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity does not exist (404)
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// Path segment that cannot name any entity (404)
    #[error("No such page: {0}")]
    UnknownPath(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// booking-common error
    #[error("Common error: {0}")]
    Common(#[from] booking_common::Error),
}

impl ApiError {
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        ApiError::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::UnknownPath(_) => StatusCode::NOT_FOUND,
            ApiError::Common(err) if err.is_missing_reference() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let page = if status == StatusCode::NOT_FOUND {
            render::errors::not_found()
        } else {
            error!(error = %self, "Request failed");
            render::errors::server_error()
        };

        (status, Html(page)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
