//! Response header middleware
//!
//! Stamps the fixed CORS and security headers on every response and answers
//! CORS preflight requests directly.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

const FIXED_HEADERS: [(&str, &str); 10] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-credentials", "true"),
    (
        "access-control-allow-headers",
        "origin, content-type, accept, authorization, x-requested-with",
    ),
    (
        "access-control-allow-methods",
        "GET, POST, PUT, DELETE, OPTIONS, HEAD",
    ),
    ("access-control-max-age", "3600"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("x-service-name", "Meteorologia-Mock-API"),
];

/// `X-API-Version` follows the crate version
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

fn apply_fixed_headers(headers: &mut HeaderMap) {
    for (name, value) in FIXED_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers.insert(
        HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );
}

/// Adds the fixed header set; `OPTIONS` short-circuits with an empty 200
pub async fn response_headers(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        tracing::debug!("Preflight for {}", request.uri().path());
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_fixed_headers(response.headers_mut());
    response
}
