//! Plaintext HTTP response writers
//!
//! Every response body Gesedels produces goes through one of these functions,
//! which keeps the `server error N:` / `client error N:` envelope uniform.
//! Messages are any `Display` value, usually built with `format_args!`.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::fmt::Display;

/// Content type of every response.
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Write a plaintext response with a trailing newline.
pub fn write_http(code: StatusCode, message: impl Display) -> Response {
    let mut response = format!("{}\n", message).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    *response.status_mut() = code;
    response
}

/// Write a plaintext server error response.
pub fn write_error(code: StatusCode, message: impl Display) -> Response {
    let message = format!("server error {}: {}", code.as_u16(), message);
    write_http(code, message)
}

/// Write a plaintext client failure response.
pub fn write_failure(code: StatusCode, message: impl Display) -> Response {
    let message = format!("client error {}: {}", code.as_u16(), message);
    write_http(code, message)
}
