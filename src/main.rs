//! PayPay to Money Forward ME converter CLI
//!
//! Converts a PayPay transaction export into chunked CSV files ready for
//! Money Forward ME's manual import.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- paypay.csv > summary.csv
//! cargo run -- --exclude moneyforward.csv --output-dir out paypay.csv
//! cargo run -- --strategy async --max-concurrent 4 --exclude april.csv --exclude may.csv paypay.csv
//! ```
//!
//! Chunk files are written to `--output-dir`, one set per payment method.
//! A summary CSV listing every file with its row count and date range is
//! written to stdout. Logs go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Reads and writes files one after another (default)
//! - **async**: Reads all exports and writes all chunk files concurrently
//!
//! # Exit Codes
//!
//! - 0: Success, including runs with nothing left to convert
//! - 1: Error (missing arguments, file not found, non UTF-8 input, unwritable output, etc.)

use paypay_mf_converter::cli;
use paypay_mf_converter::strategy;
use std::process;

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    cli::setup_logging(args.log_level);

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_load_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), config)
    };

    // Summary goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.to_job(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
