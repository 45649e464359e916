//! Response construction.
//!
//! # Responsibilities
//! - Build the binary attachment response for proxied assets
//! - Map upstream errors to HTTP status codes
//!
//! # Design Decisions
//! - Asset bodies are fully buffered, so Content-Length is always exact
//! - Error bodies are short plain text, never the upstream payload

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderName, HeaderValue, Version},
    response::{IntoResponse, Response},
};

use crate::error::UpdateError;

pub const CONTENT_TRANSFER_ENCODING: HeaderName =
    HeaderName::from_static("content-transfer-encoding");

/// A 200 response carrying `payload` as a downloadable file.
pub fn binary_attachment(version: Version, filename: &str, payload: Bytes) -> Response {
    let length = payload.len();
    let disposition = HeaderValue::from_str(&format!("attachment; filename={}", filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let mut response = Response::new(Body::from(payload));
    *response.version_mut() = version;

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("public"));
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(CONTENT_TRANSFER_ENCODING, HeaderValue::from_static("Binary"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(header::CONTENT_DISPOSITION, disposition);

    response
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        let message = match self {
            UpdateError::EmptyAssetList => "No release asset available",
            _ => "Upstream request failed",
        };
        (self.status_code(), message).into_response()
    }
}
