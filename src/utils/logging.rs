//! Logging setup.

use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the global logger from `RUST_LOG`, falling back to `warn`.
/// Safe to call more than once.
pub fn init_from_env() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(DEFAULT_FILTER),
        )
        .format_timestamp_millis()
        .init();
    });
}

/// Initialize the global logger with an explicit filter, ignoring `RUST_LOG`.
pub fn init_with_filter(filter: &str) {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .parse_filters(filter)
            .format_timestamp_millis()
            .init();
    });
}
