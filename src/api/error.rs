use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;
use crate::db::StoreError;

/// Handler-level errors
#[derive(Debug)]
pub enum ApiError {
    /// No record matches the requested identifier
    NotFound(&'static str),

    /// Application status outside the accepted set
    InvalidStatus,

    /// Store failure surfaced with its raw text
    Store(StoreError),

    /// Store failure inside an assembly path, prefixed with the operation
    Internal {
        context: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn internal(context: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Internal { context, source }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(message) => f.write_str(message),
            ApiError::InvalidStatus => f.write_str("Invalid status provided"),
            ApiError::Store(e) => write!(f, "{}", e),
            ApiError::Internal { context, source } => write!(f, "{}: {}", context, source),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidStatus => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        HttpResponse::build(status).json(ErrorResponse::message(self.to_string()))
    }
}
