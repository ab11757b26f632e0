use std::{io, sync::Once};

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "record_simulator=warn";
const DEBUG_LOG_FILTER: &str = "record_simulator=debug";
static INIT_LOGGER: Once = Once::new();

/// Initializes tracing once. `RUST_LOG` wins over the built-in filter; output goes to stderr.
pub fn init_tracing(debug: bool) {
    INIT_LOGGER.call_once(|| {
        let fallback = if debug {
            DEBUG_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        if let Err(err) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .try_init()
        {
            eprintln!("record-simulator: tracing initialization failed: {err}");
        }
    });
}
