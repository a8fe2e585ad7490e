//! Request handlers behind the serverless functions in `api/`.
//!
//! Handlers never let a request fault escape as a raw error: every outcome,
//! including failures, becomes a JSON response with CORS headers.

pub mod cors_echo;
pub mod verification;

use http::{HeaderMap, StatusCode};
use serde::Serialize;
use vercel_runtime::{Body, Error, Response};

/// Raw bytes of a request or response body.
pub fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Empty => &[],
        Body::Text(text) => text.as_bytes(),
        Body::Binary(bytes) => bytes.as_slice(),
    }
}

/// Serializes `payload` as the response body with the given headers.
pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    headers: HeaderMap,
    payload: &T,
) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(payload)?;
    build(status, headers, Body::Text(body))
}

/// Empty-body 200, used to answer preflight requests.
pub(crate) fn empty_response(headers: HeaderMap) -> Result<Response<Body>, Error> {
    build(StatusCode::OK, headers, Body::Empty)
}

fn build(status: StatusCode, headers: HeaderMap, body: Body) -> Result<Response<Body>, Error> {
    let mut response = Response::builder().status(status).body(body)?;
    *response.headers_mut() = headers;
    Ok(response)
}
