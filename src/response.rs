//! The JSON response envelope shared by all API endpoints.
//!
//! Success bodies have the shape `{"success": true, "data": ...}` (or
//! `{"success": true, "message": ...}` for operations with no payload) and
//! error bodies have the shape `{"success": false, "error": {"message": ...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SuccessEnvelope<T: Serialize> {
    success: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct MessageEnvelope {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// Render `data` inside the success envelope with `status_code`.
pub(crate) fn success<T: Serialize>(status_code: StatusCode, data: T) -> Response {
    (
        status_code,
        Json(SuccessEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// Render a payload-free success envelope carrying `message`.
pub(crate) fn success_message(status_code: StatusCode, message: &str) -> Response {
    (
        status_code,
        Json(MessageEnvelope {
            success: true,
            message: message.to_owned(),
        }),
    )
        .into_response()
}

/// Render the error envelope with `status_code` and `message`.
pub(crate) fn error(status_code: StatusCode, message: &str) -> Response {
    (
        status_code,
        Json(ErrorEnvelope {
            success: false,
            error: ErrorBody {
                message: message.to_owned(),
            },
        }),
    )
        .into_response()
}
