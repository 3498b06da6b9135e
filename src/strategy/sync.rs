//! Synchronous processing strategy
//!
//! Reads each export in turn with `std::fs`, runs the conversion, then
//! writes the chunk files one after another.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - File reading and chunk writing to `io::sync_reader`
//! - The conversion itself to `core::convert`
//! - The summary to `csv_format::write_chunk_summary_csv`

use crate::core::{convert, Conversion};
use crate::io::csv_format::{summarize_chunks, write_chunk_summary_csv};
use crate::io::sync_reader::{read_export, write_chunk_file};
use crate::strategy::{chunk_files, log_conversion, ConversionJob, ProcessingStrategy};
use crate::types::ConvertError;
use std::io::Write;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use paypay_mf_converter::core::ChunkConfig;
/// use paypay_mf_converter::strategy::{ConversionJob, ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::PathBuf;
///
/// let job = ConversionJob {
///     source: PathBuf::from("paypay.csv"),
///     exclusions: vec![PathBuf::from("moneyforward.csv")],
///     output_dir: PathBuf::from("out"),
///     chunk: ChunkConfig::default(),
/// };
///
/// SyncProcessingStrategy
///     .process(&job, &mut std::io::stdout())
///     .expect("Conversion failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        job: &ConversionJob,
        output: &mut dyn Write,
    ) -> Result<Conversion, ConvertError> {
        let source = read_export(&job.source)?;
        let aggregators = job
            .exclusions
            .iter()
            .map(|path| read_export(path))
            .collect::<Result<Vec<_>, _>>()?;

        let conversion = convert(&source, &aggregators, &job.chunk)?;
        log_conversion(&conversion, job);

        for (file_name, data) in chunk_files(&conversion) {
            write_chunk_file(&job.output_dir, &file_name, data)?;
        }

        write_chunk_summary_csv(&summarize_chunks(&conversion.chunks), output)?;

        Ok(conversion)
    }
}
