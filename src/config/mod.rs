//! Runtime configuration for the functions, read from the environment.
//!
//! Vercel injects project environment variables into each invocation;
//! every setting has a default so an unconfigured deployment behaves
//! exactly like the stock endpoints.

use crate::utils::error::{FunctionError, Result};
use std::env;
use std::time::Duration;

/// Wildcard origin used when `CORS_ALLOW_ORIGIN` is unset.
pub const DEFAULT_ALLOW_ORIGIN: &str = "*";

/// Upper bound on a single email delivery attempt.
pub const DEFAULT_DELIVERY_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Value sent in `Access-Control-Allow-Origin`.
    pub allow_origin: String,
    /// Deadline for handing a verification email to the sender.
    pub delivery_timeout: Duration,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        FunctionConfig {
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            delivery_timeout: Duration::from_millis(DEFAULT_DELIVERY_TIMEOUT_MS),
        }
    }
}

impl FunctionConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_origin = lookup("CORS_ALLOW_ORIGIN")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOW_ORIGIN.to_string());

        let delivery_timeout = match lookup("EMAIL_DELIVERY_TIMEOUT_MS") {
            Some(raw) => parse_timeout_ms(&raw)?,
            None => Duration::from_millis(DEFAULT_DELIVERY_TIMEOUT_MS),
        };

        Ok(FunctionConfig {
            allow_origin,
            delivery_timeout,
        })
    }

    /// Reads the environment, falling back to defaults when it is invalid.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Invalid function configuration, using defaults");
            FunctionConfig::default()
        })
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(FunctionError::Config {
            message: "EMAIL_DELIVERY_TIMEOUT_MS must be greater than zero".to_string(),
        }),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(FunctionError::Config {
            message: format!("EMAIL_DELIVERY_TIMEOUT_MS is not a valid integer: {e}"),
        }),
    }
}
