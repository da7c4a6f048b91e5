use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "QUANTPRO_LOG";

/// Picks the log filter: `QUANTPRO_LOG`, then `RUST_LOG`, then `debug` when
/// verbose and `warn` otherwise.
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// reserved for results.
pub fn init_telemetry(verbose: bool) {
    tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
