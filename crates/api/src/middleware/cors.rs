//! CORS policy for browser clients.

use axum::http::{HeaderName, Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Non-standard request header accepted from browsers.
const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// Any origin may call the API; credentials are not supported.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            X_CSRF_TOKEN,
            header::AUTHORIZATION,
        ])
}
