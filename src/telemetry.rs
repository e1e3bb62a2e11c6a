//! Structured logging setup for the server binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global JSON subscriber. `RUST_LOG` overrides the default
/// filter; protocol chatter sits at debug level, table events at info.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,skatrunde=info,actix_web=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(false).json())
        .init();
}
