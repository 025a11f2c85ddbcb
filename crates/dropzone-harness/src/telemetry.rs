//! Subscriber setup for the core's `tracing` events.
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` enables the core's
//! `dropzone` target at debug level.

use tracing_subscriber::EnvFilter;

/// Install a global stderr subscriber. A second call is a no-op.
pub fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "warn,dropzone=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
