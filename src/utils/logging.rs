// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Crate output at INFO, everything else (reqwest, hyper, html5ever) only from WARN.
pub const DEFAULT_LOG_FILTER: &str = "warn,speakers_grid=info";

/// Builds the filter from `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`.
fn build_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Sets up the logging framework using tracing_subscriber.
/// An unparsable `RUST_LOG` is ignored in favor of the default filter.
pub fn setup_logging() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete.");
}
