//! Grouped output rows and the size-bounded chunks they are cut into

use super::row::{Row, Timestamp};
use std::collections::BTreeMap;

/// Upper bound on rows per chunk imposed by the aggregator's importer
pub const MAX_CHUNK_ROWS: usize = 100;

/// Surviving rows per payment method, each list in source order
pub type GroupedRows = BTreeMap<String, Vec<Row>>;

/// Chunks per payment method, each list in part order
pub type ChunkedGroups = BTreeMap<String, Vec<Chunk>>;

/// One serialized, importable slice of a payment method's rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// CSV text: header line followed by the chunk's rows
    pub data: String,

    /// Number of data rows in `data`
    pub count: usize,

    /// Earliest transaction date within this chunk only
    pub start_date: Option<Timestamp>,

    /// Latest transaction date within this chunk only
    pub end_date: Option<Timestamp>,

    /// Set by the caller once the chunk has been imported
    ///
    /// Always `false` when produced; the pipeline never reads it back.
    pub imported: bool,
}
