//! Tracing subscriber setup for the desktop binary.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a stdout subscriber filtered by `RUST_LOG` (default `info`).
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(cfg!(debug_assertions));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    // Ignore repeated initialisation.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
