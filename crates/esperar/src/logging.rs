//! Tracing subscriber setup for binaries and tests that want output.
//!
//! The library itself only emits `tracing` events; nothing is printed
//! unless a subscriber is installed.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Install a formatted subscriber with an explicit filter directive
/// (e.g. `"esperar=trace"`).
pub fn init_with_filter(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}
