// src/server/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::ScheduleError;

impl IntoResponse for ScheduleError {
    fn into_response(self) -> Response {
        let status = match self {
            ScheduleError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ScheduleError::FetchFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Display of FetchFailure is the generic message; the cause was logged upstream.
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
