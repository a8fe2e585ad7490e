use http::{Method, StatusCode};
use thiserror::Error;

use crate::mailer::DeliveryError;

#[derive(Error, Debug)]
pub enum FunctionError {
    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Cannot read verification fields from a null body")]
    NullBody,

    #[error("Email delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl FunctionError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            FunctionError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            FunctionError::MissingFields(_) => StatusCode::BAD_REQUEST,
            FunctionError::Delivery(_) => StatusCode::BAD_GATEWAY,
            FunctionError::InvalidBody(_)
            | FunctionError::NullBody
            | FunctionError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, FunctionError>;
