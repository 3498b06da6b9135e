// CLI module
// Command-line interface, argument parsing and log setup

mod args;

pub use args::{CliArgs, LogLevel, StrategyType};

use clap::Parser;
use std::io::stderr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the stderr log subscriber
///
/// stdout carries the summary CSV, so logs go to stderr.
pub fn setup_logging(level: impl Into<LevelFilter>) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level.into());

    tracing_subscriber::registry().with(terminal_log).init();
}
