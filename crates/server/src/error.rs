use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quizpool_engine::{Error, ErrorKind};

use crate::schemas::ErrorResponse;

/// Engine error carried through handlers and rendered as
/// `{ "error": "<message>" }` with a status derived from the error kind.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::InvalidState | ErrorKind::Validation => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
