//! Tracing subscriber initialisation
//!
//! Native builds log to stderr through `tracing-subscriber`'s fmt layer.
//! Browser builds route the same events to the web console via `tracing-web`.

use crate::error::{CoreError, CoreResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the env filter, preferring `RUST_LOG` over the configured level
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for native targets (tests, tools)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing(log_level: &str) -> CoreResult<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(log_level))
        .try_init()
        .map_err(|e| CoreError::logging(e.to_string()))
}

/// Initialize tracing for the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_tracing(log_level: &str) -> CoreResult<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(log_level))
        .try_init()
        .map_err(|e| CoreError::logging(e.to_string()))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_reports_an_error() {
        // Whichever call runs first in this process wins; the next one must fail cleanly.
        let _ = init_tracing("debug");
        assert!(matches!(
            init_tracing("debug"),
            Err(CoreError::Logging { .. })
        ));
    }
}
