//! Logging Infrastructure
//!
//! Structured logging setup via `tracing`.

/// Initialize the tracing subscriber.
///
/// Filter comes from `RUST_LOG`, defaulting to `info` for the server and
/// tower-http request traces.
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foh_server=info,tower_http=info".into()),
        )
        .init();
}
