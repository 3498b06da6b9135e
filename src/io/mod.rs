//! I/O module
//!
//! Handles CSV text and the files it comes from and goes to.
//!
//! # Components
//!
//! - `schema` - Column labels of both exports and typed row views
//! - `csv_format` - CSV parsing/serialization, chunk naming, run summary
//! - `sync_reader` - Blocking file reads and chunk writes
//! - `async_reader` - Concurrent file reads and chunk writes on tokio

pub mod async_reader;
pub mod csv_format;
pub mod schema;
pub mod sync_reader;

pub use csv_format::{
    chunk_file_name, duplicate_headers, parse_rows, serialize_rows, summarize_chunks,
    write_chunk_summary_csv, ChunkSummary, ParsedCsv,
};
pub use schema::{AggregatorRecord, SourceRecord};
