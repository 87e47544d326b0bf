//! Maps core and transport errors onto the `{error, message}` HTTP contract
//!
//! `NotFound` maps to 404; `Duplicate`, `OutOfRange`, and `Invalid` map to
//! 400; anything else (snapshot I/O, internal bugs) maps to 500. No
//! variant ever serializes a Rust `Debug` rendering into the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leaderboard_core::Error as CoreError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ApiErrorBody {
                error: "not_found",
                message: message.into(),
            },
        }
    }

    pub fn bad_request(tag: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                error: tag,
                message: message.into(),
            },
        }
    }

    pub fn rate_limit_exceeded() -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: ApiErrorBody {
                error: "rate_limit_exceeded",
                message: "too many requests, slow down".to_string(),
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody {
                error: "internal_error",
                message: message.into(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(id) => {
                log::warn!("404 not_found: {id}");
                ApiError::not_found(format!("user not found: {id}"))
            }
            CoreError::Duplicate(id) => {
                log::warn!("400 duplicate: {id}");
                ApiError::bad_request("duplicate", format!("user already exists: {id}"))
            }
            CoreError::OutOfRange { rating, min, max } => {
                log::warn!("400 out_of_range: {rating} not in [{min}, {max}]");
                ApiError::bad_request(
                    "out_of_range",
                    format!("rating {rating} out of range [{min}, {max}]"),
                )
            }
            CoreError::Invalid(detail) => {
                log::warn!("400 invalid: {detail}");
                ApiError::bad_request("invalid", detail)
            }
            CoreError::Io(detail) => {
                log::error!("500 io: {detail}");
                ApiError::internal("a storage error occurred")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
