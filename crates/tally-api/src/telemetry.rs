//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - Default: `info,tally=debug,sqlx=warn`
//! - Override: set `RUST_LOG` (e.g. `RUST_LOG=tally_db=trace`)

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tally=debug,sqlx=warn";

/// Initializes the global tracing subscriber.
///
/// Call once at process start. Later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init: a second subscriber (e.g. from a test harness) is not an error
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
