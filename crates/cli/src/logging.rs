//! Logging bootstrap for the CLI.

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// Default output is warnings plus this crate's progress lines; `-v` adds
/// info, `-vv` debug for everything. `RUST_LOG` overrides the mapping
/// entirely.
pub fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn,adpost=info",
        1 => "info,adpost=debug",
        _ => "debug",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
