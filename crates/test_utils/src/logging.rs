//! Log output for tests
//!
//! Tests call [`init_test_tracing`] to see the ledger's `tracing` events.
//! Output is filtered by `RUST_LOG`, defaulting to `debug` for the ledger
//! crates.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("domain_fees=debug,core_kernel=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // another test binary may already own the global subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
});

/// Installs the test subscriber once per process
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
