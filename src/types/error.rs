//! Error types for the PayPay to Money Forward converter
//!
//! Only the I/O surface and CSV serialization produce errors. Malformed data
//! rows never do: the pipeline degrades them (skipped record, dropped row,
//! `None` date) and keeps going.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, non UTF-8 input
//! - **CSV Errors**: Reader or writer failures reported by the csv crate
//! - **Runtime Errors**: The async runtime could not be started

use thiserror::Error;

/// Main error type for the converter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Input file is not valid UTF-8
    ///
    /// Transcoding from the export's native encoding is left to the caller.
    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding {
        /// The offending file
        path: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// CSV serialization of a chunk or the summary failed
    #[error("CSV write error: {message}")]
    SerializeError {
        /// Description of the failure
        message: String,
    },

    /// The async runtime could not be created
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to ConvertError
impl From<std::io::Error> for ConvertError {
    fn from(error: std::io::Error) -> Self {
        ConvertError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ConvertError
impl From<csv::Error> for ConvertError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        ConvertError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl ConvertError {
    /// Map an I/O error raised while opening `path`, keeping "not found" distinct
    pub fn from_io(error: std::io::Error, path: &std::path::Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => ConvertError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConvertError::IoError {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }

    /// Create an InvalidEncoding error
    pub fn invalid_encoding(path: &std::path::Path) -> Self {
        ConvertError::InvalidEncoding {
            path: path.display().to_string(),
        }
    }

    /// Create a SerializeError
    pub fn serialize(message: impl Into<String>) -> Self {
        ConvertError::SerializeError {
            message: message.into(),
        }
    }
}
