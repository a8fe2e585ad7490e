use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::verification::{VerificationRequest, REQUIRED_FIELDS};

pub const ECHO_MESSAGE: &str = "CORS is working!";
pub const SUCCESS_MESSAGE: &str = "Verification email sent successfully";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const DELIVERY_FAILED: &str = "Email delivery failed";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Current UTC time as ISO 8601 with millisecond precision, e.g.
/// `2025-01-15T08:30:00.000Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body returned by the CORS-echo function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoResponse {
    pub message: String,
}

impl Default for EchoResponse {
    fn default() -> Self {
        EchoResponse {
            message: ECHO_MESSAGE.to_string(),
        }
    }
}

/// Acknowledgment for an accepted verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
    /// ISO 8601 time the request was accepted.
    pub timestamp: String,
    /// The validated fields, echoed back unchanged.
    pub data: VerificationRequest,
}

impl SuccessResponse {
    pub fn new(data: VerificationRequest) -> Self {
        SuccessResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            timestamp: timestamp_now(),
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodNotAllowedResponse {
    pub error: String,
}

impl Default for MethodNotAllowedResponse {
    fn default() -> Self {
        MethodNotAllowedResponse {
            error: METHOD_NOT_ALLOWED.to_string(),
        }
    }
}

/// 400 body. `required` always lists every required field so clients can
/// correct the whole payload at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingFieldsResponse {
    pub error: String,
    pub required: Vec<String>,
}

impl Default for MissingFieldsResponse {
    fn default() -> Self {
        MissingFieldsResponse {
            error: MISSING_FIELDS.to_string(),
            required: REQUIRED_FIELDS.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Body of 5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl FailureResponse {
    pub fn new(error: &str, message: &str) -> Self {
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR
        } else {
            message
        };

        FailureResponse {
            success: false,
            error: error.to_string(),
            message: message.to_string(),
            timestamp: timestamp_now(),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    pub fn delivery(message: &str) -> Self {
        Self::new(DELIVERY_FAILED, message)
    }
}
