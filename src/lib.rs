//! PayPay to Money Forward ME converter library
//! # Overview
//!
//! This library turns a PayPay transaction export into CSV files Money
//! Forward ME can import by hand, skipping transactions Money Forward
//! already recorded, with both a sync and an async file-handling strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Row, Transaction, Stats, Chunk, etc.)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Conversion pipeline:
//!   - [`core::dates`] - Date normalization to JST timestamps
//!   - [`core::extractor`] - Source rows into transactions, splitting combined payments
//!   - [`core::exclusion`] - Dedup keys from Money Forward exports
//!   - [`core::filter`] - Deduplication and grouping by payment method
//!   - [`core::chunker`] - Size-bounded CSV chunks
//! - [`io`] - CSV text handling and file reads/writes
//! - [`strategy`] - Complete runs, sync or concurrent
//!
//! # Combined Payments
//!
//! A PayPay row paid with several methods, such as
//! `PayPayポイント (93円), PayPay残高 (317円)`, becomes one transaction per
//! method so each lands in that method's import files with its own amount.
//!
//! # Deduplication
//!
//! Source transactions are keyed by date, signed amount, payment method and
//! counterparty; Money Forward rows by date, amount, institution and
//! content. A source transaction whose key appears in any Money Forward
//! export is dropped.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{convert, ChunkConfig, Conversion};
pub use io::write_chunk_summary_csv;
pub use types::{
    Chunk, ChunkedGroups, ConvertError, Direction, ExclusionKeySet, GroupedRows, Row, Stats,
    Timestamp, Transaction,
};
