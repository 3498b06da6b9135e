//! Core conversion logic
//!
//! This module contains the pipeline stages, leaves first:
//! - `dates` - Date parsing and range bookkeeping
//! - `extractor` - Source parsing, combined-payment splitting, dedup keys
//! - `exclusion` - Dedup key set from the aggregator's exports
//! - `filter` - Deduplication and grouping by payment method
//! - `chunker` - Size-bounded CSV chunks per payment method
//! - `pipeline` - The stages wired together

pub mod chunker;
pub mod dates;
pub mod exclusion;
pub mod extractor;
pub mod filter;
pub mod pipeline;

pub use chunker::{chunk_groups, ChunkConfig};
pub use dates::{observe_row, parse_date, update_date_range};
pub use exclusion::{build_exclusions, Exclusions};
pub use extractor::{extract_transactions, Extraction};
pub use filter::{filter_transactions, FilterOutcome};
pub use pipeline::{convert, Conversion};
