use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// Logs always go to stderr; stdout carries the stdio MCP stream. `RUST_LOG`
/// overrides the default `info` filter. Repeated calls are ignored.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = if json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false),
            )
            .with(filter)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing already initialized, skipping re-initialization");
    }
}
