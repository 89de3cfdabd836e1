//! Log output for the deployed functions

use tracing_subscriber::EnvFilter;

/// Install a JSON `tracing` subscriber writing to stdout.
///
/// Lambda forwards stdout to CloudWatch, which stamps every line, so
/// timestamps are left out. `RUST_LOG` overrides the default `info` level.
/// Calling this more than once keeps the first subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .with_target(false)
        .without_time()
        .try_init();
}
