//! Edge Mail Functions — Shared Library
//!
//! This crate contains the CORS policy, request/response models,
//! the simulated mailer, and the handler logic used by the
//! serverless functions in `api/`.
//!
//! Each function binary stays thin: it reads its configuration,
//! installs logging, and delegates every request to `handlers`.

pub mod config;
pub mod cors;
pub mod handlers;
pub mod mailer;
pub mod models;
pub mod utils;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
