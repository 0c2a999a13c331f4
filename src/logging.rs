//! Logging setup shared by the binaries.

use tracing_subscriber::{fmt, EnvFilter};

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter (`warn`, or `tabconf=debug` with `verbose`).
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "warn,tabconf=debug" } else { "warn" })
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
