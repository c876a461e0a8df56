//! Security headers applied to every response.

use axum::{
    extract::Request,
    http::{
        header::{CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
        HeaderValue,
    },
    middleware::Next,
    response::Response,
};

pub const FRAME_OPTIONS: &str = "SAMEORIGIN";
pub const CONTENT_TYPE_OPTIONS: &str = "nosniff";
pub const CSP: &str = "default-src 'self'; object-src 'none'";
pub const REFERRER: &str = "strict-origin-when-cross-origin";

/// Headers applied:
/// - `X-Frame-Options: SAMEORIGIN`
/// - `X-Content-Type-Options: nosniff`
/// - `Content-Security-Policy: default-src 'self'; object-src 'none'`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
///
/// `Access-Control-Allow-Origin` comes from the CORS layer.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static(FRAME_OPTIONS));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static(CONTENT_TYPE_OPTIONS));
    headers.insert(CONTENT_SECURITY_POLICY, HeaderValue::from_static(CSP));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static(REFERRER));

    response
}
