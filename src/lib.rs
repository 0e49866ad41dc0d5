pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod report;

pub use cli::Cli;
pub use error::{AppError, AppResult};

use clap::Parser;

/// Main library entry point
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.log_format);
    commands::filter::run_filter(cli)
}
