//! Tracing setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter from `RUST_LOG`, falling back to debug output for the service crates.
///
/// Reads the process environment, so `.env` has to be loaded before this runs.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=debug,notes_web=debug,tower_http=debug",
            env!("CARGO_CRATE_NAME")
        ))
    })
}

/// Installs the global subscriber.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
