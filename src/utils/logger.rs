use http::HeaderMap;
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Header Vercel stamps on every invocation.
const REQUEST_ID_HEADER: &str = "x-vercel-id";

/// Installs the JSON subscriber used by the deployed functions.
///
/// Filtering follows `RUST_LOG`, defaulting to this crate at `info`.
/// Calling it more than once keeps the first subscriber.
pub fn init_function_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("edge_mail_functions=info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init();
}

/// Span scoping every event emitted while one request is handled.
pub fn request_span(function: &'static str, method: &http::Method, headers: &HeaderMap) -> Span {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        function,
        method = %method,
        request_id = %request_id
    )
}
