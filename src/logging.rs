use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "JSONAPI_STORE_LOG";

/// Initialize tracing on stderr so stdout stays machine-readable.
///
/// `JSONAPI_STORE_LOG` takes precedence over `RUST_LOG`, which takes
/// precedence over the configured filter. Calling this twice is harmless.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(UtcTime::rfc_3339())
        .try_init();
}
