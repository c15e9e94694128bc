//! Common test-only helpers shared across the workspace's test suites.

use std::sync::Once;

static LOG_INIT: Once = Once::new();

/// Enables `tracing` output for tests, honouring `RUST_LOG` / `LOG_FILTER`
/// the way a real IOx binary would via `trogging`. Safe to call from every
/// test function; only the first call takes effect.
pub fn maybe_start_logging() {
    LOG_INIT.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = std::env::var("LOG_FILTER")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "warn".to_string());

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A `tempfile::TempDir` wrapper kept around purely so call sites read the
/// same way the rest of the workspace's tests do; re-exported for
/// convenience.
pub use tempfile;
