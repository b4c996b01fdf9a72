//! plx library - exposes the plugin reconciliation core for the binary and tests

pub mod commands;
pub mod common;
pub mod plugins;

pub use common::GlobalOpts;
pub use plx_logger as logger;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Route `tracing` events from the library crates to stderr.
///
/// `RUST_LOG` wins over the verbosity-derived default.
pub fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
