//! Weak ETags for development builds
//!
//! `GET`/`HEAD` responses with status 200 are buffered and tagged with a
//! SHA-256 of the body; a request whose `If-None-Match` already carries
//! that tag gets `304 Not Modified` without a body.

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::crypto::{sha256, to_base64_url};

/// `axum::middleware::from_fn` handler
pub async fn etag(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let cacheable = method == Method::GET || method == Method::HEAD;
    let if_none_match = request.headers().get(header::IF_NONE_MATCH).cloned();

    let response = next.run(request).await;
    if !cacheable
        || response.status() != StatusCode::OK
        || response.headers().contains_key(header::ETAG)
    {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer response body for ETag");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let tag = weak_etag(&bytes);
    let Ok(value) = HeaderValue::from_str(&tag) else {
        return Response::from_parts(parts, Body::from(bytes));
    };

    if if_none_match.is_some_and(|candidates| matches_any(&candidates, &tag)) {
        let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
        not_modified.headers_mut().insert(header::ETAG, value);
        return not_modified;
    }

    parts.headers.insert(header::ETAG, value);
    Response::from_parts(parts, Body::from(bytes))
}

/// `W/"<body length in hex>-<27 chars of base64url SHA-256>"`
pub fn weak_etag(body: &[u8]) -> String {
    let digest = to_base64_url(&sha256(body));
    format!("W/\"{:x}-{}\"", body.len(), &digest[..27])
}

/// Weak comparison against a comma-separated `If-None-Match` list
fn matches_any(header: &HeaderValue, tag: &str) -> bool {
    let Ok(list) = header.to_str() else {
        return false;
    };
    let opaque = tag.trim_start_matches("W/");

    list.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.trim_start_matches("W/") == opaque
    })
}
