//! Verification email delivery.
//!
//! Delivery is simulated: `SimulatedSender` only logs what would be sent.
//! A real provider plugs in by implementing `EmailSender`; the handler
//! always goes through `deliver`, which bounds each attempt with a timeout.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::verification::{display_value, VerificationRequest};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("delivery timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    #[error("provider rejected the message: {reason}")]
    Rejected { reason: String },
}

/// A rendered verification email, ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl VerificationEmail {
    /// Renders the message for a request that already passed validation.
    pub fn render(request: &VerificationRequest) -> Self {
        let employee = display_value(&request.employee_name);
        let office = display_value(&request.office_name);
        let code = display_value(&request.verification_code);

        VerificationEmail {
            from: display_value(&request.from_email),
            to: display_value(&request.to_email),
            subject: format!("Verification code for {office}"),
            text: format!(
                "Hello {employee},\n\nYour verification code for {office} is: {code}\n"
            ),
        }
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &VerificationEmail) -> Result<(), DeliveryError>;
}

/// Accepts every message without contacting a provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSender;

#[async_trait]
impl EmailSender for SimulatedSender {
    async fn send(&self, email: &VerificationEmail) -> Result<(), DeliveryError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            "Simulated verification email delivery"
        );
        Ok(())
    }
}

/// Sends `email`, failing with `DeliveryError::TimedOut` once `timeout` elapses.
pub async fn deliver(
    sender: &dyn EmailSender,
    email: &VerificationEmail,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    match tokio::time::timeout(timeout, sender.send(email)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::TimedOut(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StalledSender;

    #[async_trait]
    impl EmailSender for StalledSender {
        async fn send(&self, _email: &VerificationEmail) -> Result<(), DeliveryError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            from_email: json!("a@x.com"),
            to_email: json!("b@x.com"),
            employee_name: json!("Jane"),
            office_name: json!("HQ"),
            verification_code: json!(123456),
        }
    }

    #[test]
    fn test_render_uses_request_fields() {
        let email = VerificationEmail::render(&request());

        assert_eq!(email.from, "a@x.com");
        assert_eq!(email.to, "b@x.com");
        assert_eq!(email.subject, "Verification code for HQ");
        assert!(email.text.contains("Hello Jane"));
        assert!(email.text.contains("123456"));
    }

    #[tokio::test]
    async fn test_simulated_sender_always_succeeds() {
        let email = VerificationEmail::render(&request());
        let result = deliver(&SimulatedSender, &email, Duration::from_secs(1)).await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_stalled_sender_times_out() {
        let email = VerificationEmail::render(&request());
        let timeout = Duration::from_millis(20);

        let result = deliver(&StalledSender, &email, timeout).await;
        assert_eq!(result, Err(DeliveryError::TimedOut(timeout)));
    }
}
