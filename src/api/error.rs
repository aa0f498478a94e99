use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::db::DbError;
use crate::util::object_id;

/// Errors surfaced to clients. Absent targets on write endpoints are not
/// errors; they come back as zero-count acknowledgments.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("store unavailable: {0}")]
    Store(#[from] DbError),
    #[error("malformed id: {0}")]
    MalformedId(String),
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(e) => {
                error!("store operation failed: {}", e);
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::MalformedId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Validate a path parameter against the store id format before it
/// reaches a query.
pub fn check_object_id(id: &str) -> Result<&str, ApiError> {
    if object_id::is_valid(id) {
        Ok(id)
    } else {
        Err(ApiError::MalformedId(id.to_string()))
    }
}
