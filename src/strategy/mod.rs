//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete conversion runs:
//! reading the exports, running the pure pipeline, writing chunk files and
//! the summary. The strategies differ only in how files are read and
//! written (blocking vs concurrent on tokio); the conversion itself is shared.

use crate::cli::StrategyType;
use crate::core::{ChunkConfig, Conversion};
use crate::io::chunk_file_name;
use crate::io::csv_format::format_timestamp;
use crate::types::ConvertError;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, LoadConfig};
pub use sync::SyncProcessingStrategy;

/// Everything a conversion run needs to know
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionJob {
    /// PayPay export to convert
    pub source: PathBuf,

    /// Money Forward exports whose transactions must not be imported again
    pub exclusions: Vec<PathBuf>,

    /// Directory chunk files are written to
    pub output_dir: PathBuf,

    pub chunk: ChunkConfig,
}

/// Processing strategy trait for complete conversion runs
pub trait ProcessingStrategy: Send + Sync {
    /// Convert the job's exports, write chunk files, and write the summary to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(Conversion)` when the run completed, including runs with nothing
    ///   left to convert
    /// * `Err(ConvertError)` when an input could not be read or an output
    ///   could not be written
    fn process(
        &self,
        job: &ConversionJob,
        output: &mut dyn Write,
    ) -> Result<Conversion, ConvertError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<LoadConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

/// File name and CSV text of every chunk, in summary order
pub(crate) fn chunk_files(conversion: &Conversion) -> Vec<(String, &str)> {
    conversion
        .chunks
        .iter()
        .flat_map(|(method, chunks)| {
            chunks
                .iter()
                .enumerate()
                .map(move |(index, chunk)| (chunk_file_name(method, index + 1), chunk.data.as_str()))
        })
        .collect()
}

/// Log the run's totals and the conditions a user should hear about
pub(crate) fn log_conversion(conversion: &Conversion, job: &ConversionJob) {
    let source = &conversion.source_stats;
    info!(
        "Source: {} rows from {} to {}",
        source.count,
        format_timestamp(source.start_date),
        format_timestamp(source.end_date)
    );

    if !job.exclusions.is_empty() {
        let aggregator = &conversion.aggregator_stats;
        info!(
            "Aggregator: {} rows from {} to {}, {} exclusion keys, {} duplicates",
            aggregator.stats.count,
            format_timestamp(aggregator.stats.start_date),
            format_timestamp(aggregator.stats.end_date),
            conversion.exclusion_keys,
            aggregator.duplicates
        );

        // Rows flagged as not counted still count here; only a file with no rows warns
        if aggregator.stats.count == 0 {
            warn!("No transactions found in the aggregator exports");
        }
    }

    if conversion.is_empty() {
        warn!("Nothing to convert: no new transactions after deduplication");
    }
}
