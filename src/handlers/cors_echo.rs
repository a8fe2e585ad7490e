use http::StatusCode;
use vercel_runtime::{Body, Error, Request, Response};

use super::{empty_response, json_response};
use crate::config::FunctionConfig;
use crate::cors::{is_preflight, with_json, CorsPolicy};
use crate::models::response::EchoResponse;
use crate::utils::logger::request_span;

pub const FUNCTION_NAME: &str = "cors-fix";

/// Any method — confirms CORS is reachable from the browser.
///
/// Preflight requests get the full CORS header set and no body; every other
/// request gets `{"message": "CORS is working!"}`.
pub fn handle(req: &Request, config: &FunctionConfig) -> Result<Response<Body>, Error> {
    let span = request_span(FUNCTION_NAME, req.method(), req.headers());
    let _guard = span.enter();

    let policy = CorsPolicy::echo(&config.allow_origin);

    if is_preflight(req.method()) {
        tracing::debug!("Handling CORS preflight request");
        return empty_response(policy.preflight_headers());
    }

    json_response(
        StatusCode::OK,
        with_json(&policy.origin_headers()),
        &EchoResponse::default(),
    )
}
