//! Asynchronous processing strategy
//!
//! Reads the source export and every aggregator export concurrently, runs
//! the conversion, then writes all chunk files concurrently. The conversion
//! step itself is the same pure function the sync strategy uses, so both
//! produce identical chunks and summaries.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── LoadConfig (worker threads)
//!     ├── async_reader::read_export / read_exports  (concurrent reads)
//!     ├── core::convert                              (pure pipeline)
//!     └── async_reader::write_chunk_files           (concurrent writes)
//! ```

use crate::core::{convert, Conversion};
use crate::io::async_reader::{read_export, read_exports, write_chunk_files};
use crate::io::csv_format::{summarize_chunks, write_chunk_summary_csv};
use crate::strategy::{chunk_files, log_conversion, ConversionJob, ProcessingStrategy};
use crate::types::ConvertError;
use std::io::Write;
use tracing::warn;

/// Configuration for concurrent file handling
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadConfig {
    /// Worker threads of the tokio runtime
    pub max_concurrent_reads: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_reads: num_cpus::get(),
        }
    }
}

impl LoadConfig {
    /// Create a new LoadConfig, falling back to the default for 0
    pub fn new(max_concurrent_reads: usize) -> Self {
        let default = Self::default();

        let max_concurrent_reads = if max_concurrent_reads == 0 {
            warn!(
                "Invalid max_concurrent_reads ({}), using default ({})",
                max_concurrent_reads, default.max_concurrent_reads
            );
            default.max_concurrent_reads
        } else {
            max_concurrent_reads
        };

        Self {
            max_concurrent_reads,
        }
    }
}

/// Asynchronous processing strategy
///
/// Owns no runtime between runs; each `process` call builds a multi-thread
/// tokio runtime sized by `LoadConfig` and drives the run to completion.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: LoadConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: LoadConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        job: &ConversionJob,
        output: &mut dyn Write,
    ) -> Result<Conversion, ConvertError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_reads)
            .build()
            .map_err(|e| ConvertError::RuntimeError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let conversion = runtime.block_on(async {
            let (source, aggregators) =
                futures::try_join!(read_export(&job.source), read_exports(&job.exclusions))?;

            let conversion = convert(&source, &aggregators, &job.chunk)?;
            log_conversion(&conversion, job);

            if !conversion.is_empty() {
                write_chunk_files(&job.output_dir, &chunk_files(&conversion)).await?;
            }

            Ok::<_, ConvertError>(conversion)
        })?;

        write_chunk_summary_csv(&summarize_chunks(&conversion.chunks), output)?;

        Ok(conversion)
    }
}
