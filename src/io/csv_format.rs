//! CSV format handling for export rows, chunk payloads and the run summary
//!
//! This module centralizes all CSV format concerns, providing:
//! - Header-driven parsing of export text into `Row`s
//! - Serialization of rows back to CSV in a given column order
//! - Chunk file naming and the per-chunk summary written to stdout
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{ChunkedGroups, ConvertError, Row, Timestamp};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use tracing::warn;

/// Byte-order mark accepted on input and prepended to written chunk files
pub const UTF8_BOM: char = '\u{feff}';

/// Timestamp layout used in the summary
const SUMMARY_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Header labels and data rows of one parsed export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// Header labels that appear more than once, in order of their second appearance
///
/// Rows are keyed by label, so only the last column carrying a repeated
/// label survives parsing.
pub fn duplicate_headers(headers: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .filter(|header| !seen.insert(header.as_str()))
        .map(String::as_str)
        .collect()
}

/// Parse export text into rows keyed by the header line
///
/// A leading BOM is ignored. Records the csv reader cannot read are logged
/// and skipped; empty or header-only text yields no rows rather than an error.
/// Repeated header labels are logged once per text.
pub fn parse_rows(text: &str) -> ParsedCsv {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(e) => {
            warn!("Unreadable CSV header: {}", ConvertError::from(e));
            return ParsedCsv::default();
        }
    };

    let repeated = duplicate_headers(&headers);
    if !repeated.is_empty() {
        warn!(
            "Repeated header labels {:?}: only the last column of each is kept",
            repeated
        );
    }

    let rows = reader
        .records()
        .filter_map(|result| match result {
            Ok(record) => Some(Row::from_record(&headers, &record)),
            Err(e) => {
                warn!("Skipping unreadable CSV record: {}", ConvertError::from(e));
                None
            }
        })
        .collect();

    ParsedCsv { headers, rows }
}

/// Serialize rows to CSV text with `headers` as the column order
///
/// The header line is always written. Columns a row lacks are written empty.
/// Quoting is left to the csv writer, so reparsing the text with the same
/// headers yields the same field values.
pub fn serialize_rows(headers: &[String], rows: &[Row]) -> Result<String, ConvertError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| ConvertError::serialize(format!("Failed to write CSV header: {}", e)))?;

    for row in rows {
        writer
            .write_record(headers.iter().map(|header| row.get(header).unwrap_or("")))
            .map_err(|e| ConvertError::serialize(format!("Failed to write CSV row: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ConvertError::serialize(format!("Failed to flush CSV: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| ConvertError::serialize(e.to_string()))
}

/// File name for part `part` (1-based) of a payment method's chunks
///
/// Characters that are unsafe in file names, and whitespace, become `_`.
pub fn chunk_file_name(method: &str, part: usize) -> String {
    let stem: String = method
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect();

    let stem = if stem.is_empty() { "unknown" } else { &stem };
    format!("{}_{:02}.csv", stem, part)
}

/// Format an optional timestamp for the summary; `None` becomes empty
pub fn format_timestamp(timestamp: Option<Timestamp>) -> String {
    timestamp
        .map(|ts| ts.format(SUMMARY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// One line of the run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    pub method: String,
    pub part: usize,
    pub rows: usize,
    pub start_date: String,
    pub end_date: String,
    pub file: String,
}

/// Summarize chunks in method order, then part order
pub fn summarize_chunks(chunks: &ChunkedGroups) -> Vec<ChunkSummary> {
    chunks
        .iter()
        .flat_map(|(method, parts)| {
            parts.iter().enumerate().map(move |(index, chunk)| ChunkSummary {
                method: method.clone(),
                part: index + 1,
                rows: chunk.count,
                start_date: format_timestamp(chunk.start_date),
                end_date: format_timestamp(chunk.end_date),
                file: chunk_file_name(method, index + 1),
            })
        })
        .collect()
}

/// Write the run summary as CSV
///
/// Writes the header `method,part,rows,start_date,end_date,file` even when
/// there are no chunks.
pub fn write_chunk_summary_csv(
    summaries: &[ChunkSummary],
    output: &mut dyn Write,
) -> Result<(), ConvertError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(output);

    writer
        .write_record(["method", "part", "rows", "start_date", "end_date", "file"])
        .map_err(|e| ConvertError::serialize(format!("Failed to write summary header: {}", e)))?;

    for summary in summaries {
        writer
            .serialize(summary)
            .map_err(|e| ConvertError::serialize(format!("Failed to write summary row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| ConvertError::serialize(format!("Failed to flush output: {}", e)))?;

    Ok(())
}
