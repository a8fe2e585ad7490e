use edge_mail_functions::config::FunctionConfig;
use edge_mail_functions::handlers::verification;
use edge_mail_functions::mailer::SimulatedSender;
use edge_mail_functions::utils::logger::init_function_logger;
use edge_mail_functions::version;
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_function_logger();
    tracing::info!(version = version(), "Edge function loaded successfully");
    run(handler).await
}

/// POST /api/send-verification-email — Validate a verification request and
/// acknowledge the email.
///
/// Delivery is simulated; swap `SimulatedSender` for a provider-backed
/// `EmailSender` to send real mail.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let config = FunctionConfig::from_env_or_default();
    verification::handle(req, &SimulatedSender, &config).await
}
