//! Console notice setup.
//!
//! Every notice the filter emits is a `tracing` event. The binary installs a
//! `fmt` subscriber writing to stdout; `RUST_LOG` overrides the default
//! `info` filter.

use crate::cli::LogFormat;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal());

    // A subscriber may already be installed when embedded in another tool.
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
