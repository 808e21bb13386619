// src/logging.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set to `1` to emit JSON log lines instead of the compact format.
pub const ENV_LOG_JSON: &str = "CURATOR_LOG_JSON";

/// Install the global subscriber. Logs go to stderr so rendered reports on
/// stdout stay clean. `RUST_LOG` wins over the defaults chosen here.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "news_stock_curator=debug,info"
    } else {
        "news_stock_curator=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let json = std::env::var(ENV_LOG_JSON).ok().is_some_and(|v| v == "1");

    // try_init: a second call (tests, embedding) is a no-op rather than a panic
    let result = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
