use edge_mail_functions::config::FunctionConfig;
use edge_mail_functions::handlers::cors_echo;
use edge_mail_functions::utils::logger::init_function_logger;
use vercel_runtime::{run, Body, Error, Request, Response};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_function_logger();
    run(handler).await
}

/// Any method /api/cors-fix — Confirms cross-origin requests reach the functions.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    let config = FunctionConfig::from_env_or_default();
    cors_echo::handle(&req, &config)
}
