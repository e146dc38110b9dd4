//! Logging setup
//!
//! The library only emits `tracing` events. Installing a subscriber is left to
//! the host application, which calls [`init`] once at startup.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Maps a `-v` count to a default filter directive
fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "rynab=warn",
        1 => "rynab=info",
        2 => "rynab=debug",
        _ => "rynab=trace",
    }
}

/// Installs the global fmt subscriber, writing to stderr
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Later calls are no-ops.
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
