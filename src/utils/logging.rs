// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at `debug` in debug mode
/// and at `info` everywhere else. Output goes to stderr so `--stdout` JSON stays clean.
pub fn setup_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Logging setup complete.");
}

fn default_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("info,mcq_extractor=debug")
    } else {
        EnvFilter::new("info")
    }
}
