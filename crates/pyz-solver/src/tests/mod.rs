mod types_tests;

use tracing_subscriber::EnvFilter;

/// Route narrowing trace output through `RUST_LOG` for test runs.
/// Idempotent; every test calls it and only the first init wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
