//! CORS header policy for the two functions.
//!
//! Each function owns a fixed policy. Responses never mutate a shared map:
//! every helper returns a fresh `HeaderMap` built from the policy, and
//! `with_json` layers `Content-Type` on top of whatever base it is given.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
};
use http::{HeaderMap, HeaderValue, Method};

/// Preflight cache lifetime advertised by the verification function (24 hours).
pub const VERIFICATION_MAX_AGE_SECS: u32 = 86_400;

/// CORS permissions a function grants to browsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_origin: HeaderValue,
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
    pub max_age: Option<u32>,
}

impl CorsPolicy {
    /// Policy of the CORS-echo function.
    pub fn echo(origin: &str) -> Self {
        CorsPolicy {
            allow_origin: origin_value(origin),
            allow_methods: "GET, POST, OPTIONS",
            allow_headers: "Content-Type, Authorization",
            max_age: None,
        }
    }

    /// Policy of the verification-email function. Allows the headers sent by
    /// the Supabase JS client alongside the usual ones.
    pub fn verification(origin: &str) -> Self {
        CorsPolicy {
            allow_origin: origin_value(origin),
            allow_methods: "POST, GET, OPTIONS",
            allow_headers: "Content-Type, Authorization, x-client-info, apikey, x-requested-with",
            max_age: Some(VERIFICATION_MAX_AGE_SECS),
        }
    }

    /// The full CORS header set.
    pub fn preflight_headers(&self) -> HeaderMap {
        let mut headers = self.origin_headers();
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(self.allow_methods),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(self.allow_headers),
        );
        if let Some(max_age) = self.max_age {
            headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(max_age));
        }
        headers
    }

    /// Only `Access-Control-Allow-Origin`.
    pub fn origin_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers
    }
}

/// Returns `base` plus `Content-Type: application/json`.
pub fn with_json(base: &HeaderMap) -> HeaderMap {
    let mut headers = base.clone();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

pub fn is_preflight(method: &Method) -> bool {
    *method == Method::OPTIONS
}

fn origin_value(origin: &str) -> HeaderValue {
    HeaderValue::from_str(origin).unwrap_or_else(|_| {
        tracing::warn!(origin, "Origin is not a valid header value, allowing any origin");
        HeaderValue::from_static("*")
    })
}
