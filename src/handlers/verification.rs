use http::{HeaderMap, Method, StatusCode};
use tracing::Instrument;
use vercel_runtime::{Body, Error, Request, Response};

use super::{body_bytes, empty_response, json_response};
use crate::config::FunctionConfig;
use crate::cors::{is_preflight, with_json, CorsPolicy};
use crate::mailer::{deliver, EmailSender, VerificationEmail};
use crate::models::response::{
    FailureResponse, MethodNotAllowedResponse, MissingFieldsResponse, SuccessResponse,
};
use crate::models::verification::{display_value, VerificationRequest};
use crate::utils::error::{FunctionError, Result};
use crate::utils::logger::request_span;

pub const FUNCTION_NAME: &str = "send-verification-email";

/// POST /api/send-verification-email — Validate a verification request and
/// acknowledge the (simulated) email.
///
/// Rules are applied in order, first match wins:
/// 1. `OPTIONS` → 200, empty body, CORS headers.
/// 2. any method but `POST` → 405.
/// 3. a body that is not JSON → 500.
/// 4. a falsy required field → 400 listing every required field.
/// 5. delivery failure or timeout → 502.
/// 6. otherwise → 200 echoing the validated fields.
pub async fn handle(
    req: Request,
    sender: &dyn EmailSender,
    config: &FunctionConfig,
) -> std::result::Result<Response<Body>, Error> {
    let span = request_span(FUNCTION_NAME, req.method(), req.headers());
    respond(req, sender, config).instrument(span).await
}

async fn respond(
    req: Request,
    sender: &dyn EmailSender,
    config: &FunctionConfig,
) -> std::result::Result<Response<Body>, Error> {
    tracing::info!("Received {} request", req.method());
    let policy = CorsPolicy::verification(&config.allow_origin);

    if is_preflight(req.method()) {
        tracing::info!("Handling CORS preflight request");
        return empty_response(policy.preflight_headers());
    }

    let headers = with_json(&policy.preflight_headers());

    match process(&req, sender, config).await {
        Ok(accepted) => {
            let payload = SuccessResponse::new(accepted);
            tracing::info!(timestamp = %payload.timestamp, "Sending success response");
            json_response(StatusCode::OK, headers, &payload)
        }
        Err(err) => error_response(&err, headers),
    }
}

/// Everything after the preflight check, as one fallible pipeline.
async fn process(
    req: &Request,
    sender: &dyn EmailSender,
    config: &FunctionConfig,
) -> Result<VerificationRequest> {
    if *req.method() != Method::POST {
        return Err(FunctionError::MethodNotAllowed(req.method().clone()));
    }

    tracing::info!("Processing POST request");
    let request = VerificationRequest::from_body(body_bytes(req.body()))?;
    tracing::debug!(body = ?request, "Request body parsed");

    request.validate()?;

    tracing::info!(
        "Sending verification email from {} to {}",
        display_value(&request.from_email),
        display_value(&request.to_email)
    );
    tracing::debug!(
        employee = %display_value(&request.employee_name),
        office = %display_value(&request.office_name),
        code = %display_value(&request.verification_code),
        "Verification details"
    );

    let email = VerificationEmail::render(&request);
    deliver(sender, &email, config.delivery_timeout).await?;

    Ok(request)
}

fn error_response(
    err: &FunctionError,
    headers: HeaderMap,
) -> std::result::Result<Response<Body>, Error> {
    match err {
        FunctionError::MethodNotAllowed(method) => {
            tracing::info!("Method {method} not allowed");
            json_response(err.status(), headers, &MethodNotAllowedResponse::default())
        }
        FunctionError::MissingFields(missing) => {
            tracing::info!(?missing, "Missing required fields");
            json_response(err.status(), headers, &MissingFieldsResponse::default())
        }
        FunctionError::Delivery(cause) => {
            tracing::error!(error = %cause, "Email delivery failed");
            json_response(err.status(), headers, &FailureResponse::delivery(&cause.to_string()))
        }
        _ => {
            tracing::error!(error = %err, "Verification function error");
            json_response(err.status(), headers, &FailureResponse::internal(&err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::{DeliveryError, SimulatedSender};
    use async_trait::async_trait;
    use http::header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_MAX_AGE, CONTENT_TYPE,
    };
    use serde_json::{json, Value};

    struct RejectingSender;

    #[async_trait]
    impl EmailSender for RejectingSender {
        async fn send(&self, _email: &VerificationEmail) -> std::result::Result<(), DeliveryError> {
            Err(DeliveryError::Rejected {
                reason: "mailbox unavailable".to_string(),
            })
        }
    }

    fn request(method: Method, body: Body) -> Request {
        http::Request::builder()
            .method(method)
            .uri("https://example.vercel.app/api/send-verification-email")
            .header("x-vercel-id", "iad1::test")
            .body(body)
            .unwrap()
    }

    fn post(body: &str) -> Request {
        request(Method::POST, Body::Text(body.to_string()))
    }

    async fn call(req: Request, sender: &dyn EmailSender) -> Response<Body> {
        handle(req, sender, &FunctionConfig::default()).await.unwrap()
    }

    fn json_body(response: &Response<Body>) -> Value {
        serde_json::from_slice(body_bytes(response.body())).unwrap()
    }

    /// Full CORS set plus JSON content type, carried by every non-preflight response.
    fn assert_json_cors_headers(response: &Response<Body>) {
        let headers = response.headers();
        let status = response.status();

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*", "{status}");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, GET, OPTIONS", "{status}");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization, x-client-info, apikey, x-requested-with",
            "{status}"
        );
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "86400", "{status}");
        assert_eq!(headers[CONTENT_TYPE], "application/json", "{status}");
    }

    const COMPLETE: &str = concat!(
        r#"{"fromEmail":"a@x.com","toEmail":"b@x.com","employeeName":"Jane","#,
        r#""officeName":"HQ","verificationCode":"123456"}"#
    );

    const HUGE_CODE: &str = concat!(
        r#"{"fromEmail":"a","toEmail":"b","employeeName":"c","officeName":"d","#,
        r#""verificationCode":1e400}"#
    );

    #[tokio::test]
    async fn test_preflight_returns_empty_body() {
        let response = call(request(Method::OPTIONS, Body::Empty), &SimulatedSender).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response.body()).is_empty());
        assert_eq!(response.headers()[ACCESS_CONTROL_MAX_AGE], "86400");
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_rejected_methods_return_405() {
        for method in [
            Method::GET,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
        ] {
            let response = call(request(method.clone(), Body::Empty), &SimulatedSender).await;

            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(json_body(&response), json!({ "error": "Method not allowed" }));
            assert_json_cors_headers(&response);
        }
    }

    #[tokio::test]
    async fn test_complete_request_succeeds() {
        let response = call(post(COMPLETE), &SimulatedSender).await;
        let body = json_body(&response);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["message"], json!("Verification email sent successfully"));
        assert_eq!(body["data"], serde_json::from_str::<Value>(COMPLETE).unwrap());
        assert_json_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_binary_body_is_parsed() {
        let body = Body::Binary(COMPLETE.as_bytes().to_vec());
        let response = call(request(Method::POST, body), &SimulatedSender).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_partial_request_returns_400() {
        let response = call(post(r#"{"fromEmail":"a@x.com"}"#), &SimulatedSender).await;
        let body = json_body(&response);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Missing required fields"));
        assert_eq!(
            body["required"],
            json!(["fromEmail", "toEmail", "employeeName", "officeName", "verificationCode"])
        );
        assert_json_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_malformed_body_returns_500() {
        let response = call(post("{not json"), &SimulatedSender).await;
        let body = json_body(&response);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Internal server error"));
        assert!(!body["message"].as_str().unwrap().is_empty());
        assert!(body["timestamp"].is_string());
        assert_json_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_null_body_returns_500() {
        let response = call(post("null"), &SimulatedSender).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_json_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_number_beyond_f64_range_returns_500() {
        let response = call(post(HUGE_CODE), &SimulatedSender).await;
        let body = json_body(&response);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().contains("number out of range"));
        assert_json_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_rejected_delivery_returns_502() {
        let response = call(post(COMPLETE), &RejectingSender).await;
        let body = json_body(&response);

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Email delivery failed"));
        assert_eq!(
            body["message"],
            json!("provider rejected the message: mailbox unavailable")
        );
        assert_json_cors_headers(&response);
    }
}
