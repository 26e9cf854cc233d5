use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};

use freight_common::FreightError;

/// Handler error: a domain error rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub FreightError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            FreightError::Validation(_) | FreightError::Geo(_) => StatusCode::BAD_REQUEST,
            FreightError::NotFound { .. } => StatusCode::NOT_FOUND,
            FreightError::Conflict(_) => StatusCode::CONFLICT,
            FreightError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FreightError> for ApiError {
    fn from(err: FreightError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(FreightError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(FreightError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(FreightError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
