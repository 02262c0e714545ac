//! Cross-layer integration tests for Sealtable
//!
//! Tests that verify correct interaction between multiple crates.

mod shared;

/// Routes engine logs to the test harness; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
