//! Tracing setup for the `nomen` binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::GlobalArgs;

/// The default filter directive for the given global flags.
pub fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the stderr subscriber. `RUST_LOG` overrides the flags.
pub fn init(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));
    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(global.color)
                .with_target(global.verbose),
        )
        .with(filter)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
