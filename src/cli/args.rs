use crate::core::ChunkConfig;
use crate::strategy::{ConversionJob, LoadConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Convert a PayPay transaction export into Money Forward importable CSV files
#[derive(Parser, Debug)]
#[command(name = "paypay-mf")]
#[command(
    about = "Convert a PayPay transaction export into Money Forward importable CSV files",
    long_about = None
)]
pub struct CliArgs {
    /// PayPay export (UTF-8 CSV)
    #[arg(value_name = "SOURCE", help = "Path to the PayPay transaction export")]
    pub source: PathBuf,

    /// Money Forward exports whose transactions are already recorded
    #[arg(
        long = "exclude",
        value_name = "FILE",
        help = "Money Forward export to deduplicate against (repeatable)"
    )]
    pub exclude: Vec<PathBuf>,

    /// Directory chunk files are written to
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to write chunk files into"
    )]
    pub output_dir: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' reads files in turn, 'async' reads and writes them concurrently"
    )]
    pub strategy: StrategyType,

    /// Rows per chunk
    #[arg(
        long = "chunk-size",
        value_name = "ROWS",
        help = "Rows per output file (default and maximum: 100)"
    )]
    pub chunk_size: Option<usize>,

    /// Worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads for concurrent file handling (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Log verbosity on stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level: error, warn, info, debug or trace"
    )]
    pub log_level: LogLevel,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Log levels accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl CliArgs {
    /// Build the conversion job described by the arguments
    ///
    /// An out-of-range `--chunk-size` falls back to the default with a warning.
    pub fn to_job(&self) -> ConversionJob {
        ConversionJob {
            source: self.source.clone(),
            exclusions: self.exclude.clone(),
            output_dir: self.output_dir.clone(),
            chunk: self
                .chunk_size
                .map(ChunkConfig::new)
                .unwrap_or_default(),
        }
    }

    /// Create a LoadConfig from CLI arguments, or the default when not given
    pub fn to_load_config(&self) -> LoadConfig {
        self.max_concurrent
            .map(LoadConfig::new)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "paypay.csv"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "paypay.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "paypay.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "paypay.csv"]).unwrap();
        let job = parsed.to_job();

        assert_eq!(job.source, PathBuf::from("paypay.csv"));
        assert!(job.exclusions.is_empty());
        assert_eq!(job.output_dir, PathBuf::from("."));
        assert_eq!(job.chunk, ChunkConfig::default());
        assert_eq!(parsed.log_level, LogLevel::Warn);
        assert_eq!(parsed.to_load_config(), LoadConfig::default());
    }

    #[test]
    fn test_repeated_exclusions_keep_order() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--exclude",
            "mf-april.csv",
            "--exclude",
            "mf-may.csv",
            "paypay.csv",
        ])
        .unwrap();

        assert_eq!(
            parsed.to_job().exclusions,
            vec![PathBuf::from("mf-april.csv"), PathBuf::from("mf-may.csv")]
        );
    }

    #[rstest]
    #[case::custom(&["program", "--chunk-size", "50", "paypay.csv"], 50)]
    #[case::zero_falls_back(&["program", "--chunk-size", "0", "paypay.csv"], 100)]
    #[case::over_limit_falls_back(&["program", "--chunk-size", "500", "paypay.csv"], 100)]
    fn test_chunk_size(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_job().chunk.chunk_size, expected);
    }

    #[rstest]
    #[case::custom(&["program", "--max-concurrent", "8", "paypay.csv"], 8)]
    #[case::zero_falls_back(&["program", "--max-concurrent", "0", "paypay.csv"], num_cpus::get())]
    fn test_load_config_conversion(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_load_config().max_concurrent_reads, expected);
    }

    #[rstest]
    #[case::error("error", LevelFilter::ERROR)]
    #[case::info("info", LevelFilter::INFO)]
    #[case::trace("trace", LevelFilter::TRACE)]
    fn test_log_level(#[case] level: &str, #[case] expected: LevelFilter) {
        let parsed =
            CliArgs::try_parse_from(["program", "--log-level", level, "paypay.csv"]).unwrap();
        assert_eq!(LevelFilter::from(parsed.log_level), expected);
    }

    #[rstest]
    #[case::missing_source(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "paypay.csv"])]
    #[case::invalid_log_level(&["program", "--log-level", "loud", "paypay.csv"])]
    #[case::negative_chunk_size(&["program", "--chunk-size", "-1", "paypay.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
