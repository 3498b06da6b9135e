//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `row`: CSV rows and timestamps
//! - `transaction`: Transactions, directions and the exclusion key set
//! - `stats`: Row count and date range accumulators
//! - `chunk`: Grouped rows and serialized chunks
//! - `error`: Error types for the converter

pub mod chunk;
pub mod error;
pub mod row;
pub mod stats;
pub mod transaction;

pub use chunk::{Chunk, ChunkedGroups, GroupedRows, MAX_CHUNK_ROWS};
pub use error::ConvertError;
pub use row::{Row, Timestamp};
pub use stats::{AggregatorStats, Stats};
pub use transaction::{Direction, ExclusionKeySet, Transaction};
