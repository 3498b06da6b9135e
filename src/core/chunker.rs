//! Chunking grouped rows into importable CSV files
//!
//! The aggregator imports at most `MAX_CHUNK_ROWS` rows per file, so each
//! payment method's rows are cut into consecutive windows of that size and
//! each window is serialized on its own. A window's date range covers only
//! its own rows.

use crate::core::dates::{parse_date, update_date_range};
use crate::io::csv_format::serialize_rows;
use crate::io::schema::source;
use crate::types::{Chunk, ChunkedGroups, ConvertError, GroupedRows, Row, MAX_CHUNK_ROWS};
use tracing::{info, warn};

/// Configuration for chunking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Maximum number of rows per chunk
    pub chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: MAX_CHUNK_ROWS,
        }
    }
}

impl ChunkConfig {
    /// Create a new ChunkConfig with a custom size
    ///
    /// Sizes of 0 or above `MAX_CHUNK_ROWS` are rejected with a warning and
    /// replaced by the default, so chunks never exceed the importer's limit.
    pub fn new(chunk_size: usize) -> Self {
        let default = Self::default();

        let chunk_size = if chunk_size == 0 || chunk_size > MAX_CHUNK_ROWS {
            warn!(
                "Invalid chunk_size ({}), using default ({})",
                chunk_size, default.chunk_size
            );
            default.chunk_size
        } else {
            chunk_size
        };

        Self { chunk_size }
    }
}

/// Cut every group into chunks and serialize them with `headers` as column order
///
/// Groups keep their names; a group of N rows yields `ceil(N / chunk_size)`
/// chunks, all full except possibly the last. Empty input yields an empty map.
pub fn chunk_groups(
    groups: &GroupedRows,
    headers: &[String],
    config: &ChunkConfig,
) -> Result<ChunkedGroups, ConvertError> {
    let chunk_size = config.chunk_size.clamp(1, MAX_CHUNK_ROWS);

    let chunked = groups
        .iter()
        .filter(|(_, rows)| !rows.is_empty())
        .map(|(method, rows)| {
            let chunks = rows
                .chunks(chunk_size)
                .map(|window| build_chunk(window, headers))
                .collect::<Result<Vec<_>, _>>()?;
            Ok((method.clone(), chunks))
        })
        .collect::<Result<ChunkedGroups, ConvertError>>()?;

    info!(
        "Serialized {} chunks for {} payment methods",
        chunked.values().map(Vec::len).sum::<usize>(),
        chunked.len()
    );

    Ok(chunked)
}

fn build_chunk(window: &[Row], headers: &[String]) -> Result<Chunk, ConvertError> {
    let (start_date, end_date) = window.iter().fold((None, None), |(min, max), row| {
        update_date_range(parse_date(row.get(source::DATE)), min, max)
    });

    Ok(Chunk {
        data: serialize_rows(headers, window)?,
        count: window.len(),
        start_date,
        end_date,
        imported: false,
    })
}
